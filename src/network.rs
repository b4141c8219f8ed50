mod relying_party_api;

pub use self::relying_party_api::RelyingPartyApi;
use crate::config::HttpClientConfig;
use reqwest::redirect::Policy as RedirectPolicy;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

/// Network utilities.
#[derive(Clone)]
pub struct Network {
    /// HTTP client shared by all requests of a registration attempt. It keeps a cookie store so
    /// that the relying party session survives between the options and the submission requests.
    pub http_client: ClientWithMiddleware,
}

impl Network {
    /// Creates a new `Network` instance.
    pub fn new(http_client: ClientWithMiddleware) -> Self {
        Self { http_client }
    }

    /// Creates a new `Network` instance with the HTTP client built from the configuration.
    /// Redirects are never followed, a `3xx` response is returned to the caller as is.
    pub fn create(config: &HttpClientConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(RedirectPolicy::none())
            .cookie_store(true)
            .timeout(config.timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .connection_verbose(config.verbose)
            .build()?;

        Ok(Self::new(
            ClientBuilder::new(client)
                .with(TracingMiddleware::default())
                .build(),
        ))
    }
}
