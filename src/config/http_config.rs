use serde_derive::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::time::Duration;

/// Settings of the connection to the relying party.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct HttpConfig {
    #[serde(default)]
    pub client: HttpClientConfig,
}

/// Client that fetches creation options and submits credentials. Both requests of an attempt go
/// through the same client, so the relying party session cookie set by the first one is sent
/// with the second.
#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct HttpClientConfig {
    /// Upper bound for a single relying party request, body included. An options fetch or a
    /// submission that runs longer fails the attempt.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
    /// How long a connection to the relying party stays open between the options fetch and the
    /// submission.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(default = "default_pool_idle_timeout")]
    pub pool_idle_timeout: Duration,
    /// Logs connection level details of the relying party requests.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            pool_idle_timeout: default_pool_idle_timeout(),
            verbose: false,
        }
    }
}

const fn default_pool_idle_timeout() -> Duration {
    Duration::from_secs(5)
}

const fn default_timeout() -> Duration {
    Duration::from_secs(30)
}
