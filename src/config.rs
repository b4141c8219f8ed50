mod authenticator_config;
mod http_config;
mod raw_config;
mod relying_party_config;

use crate::options::OptionsFormat;
use url::Url;

pub use self::{
    authenticator_config::AuthenticatorConfig,
    http_config::{HttpClientConfig, HttpConfig},
    raw_config::RawConfig,
    relying_party_config::RelyingPartyConfig,
};

/// Main registrar config with all relying party endpoints resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Wire format of the creation options.
    pub options_format: OptionsFormat,
    /// Endpoint that returns creation options in the configured format.
    pub options_url: Url,
    /// Endpoint that verifies the attested credential.
    pub submission_url: Url,
    /// Configuration for the HTTP functionality.
    pub http: HttpConfig,
    /// Configuration of the authenticator program.
    pub authenticator: AuthenticatorConfig,
}

impl TryFrom<RawConfig> for Config {
    type Error = anyhow::Error;

    fn try_from(raw_config: RawConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            options_format: raw_config.options_format,
            options_url: raw_config
                .relying_party
                .options_url(raw_config.options_format)?,
            submission_url: raw_config.relying_party.submission_url()?,
            http: raw_config.http,
            authenticator: raw_config.authenticator,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::{Config, RawConfig, RelyingPartyConfig},
        options::OptionsFormat,
    };

    #[test]
    fn resolves_endpoints_for_options_format() -> anyhow::Result<()> {
        let config = Config::try_from(RawConfig::default())?;
        assert_eq!(config.options_format, OptionsFormat::MessagePack);
        assert_eq!(
            config.options_url.as_str(),
            "http://localhost:8080/attestation"
        );
        assert_eq!(
            config.submission_url.as_str(),
            "http://localhost:8080/attestation"
        );

        let config = Config::try_from(RawConfig {
            options_format: OptionsFormat::Json,
            ..Default::default()
        })?;
        assert_eq!(config.options_format, OptionsFormat::Json);
        assert_eq!(
            config.options_url.as_str(),
            "http://localhost:8080/attestation/json"
        );
        assert_eq!(
            config.submission_url.as_str(),
            "http://localhost:8080/attestation"
        );

        Ok(())
    }

    #[test]
    fn fails_for_unresolvable_endpoints() {
        let raw_config = RawConfig {
            relying_party: RelyingPartyConfig {
                options_path: "http://[::1".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        assert_eq!(
            Config::try_from(raw_config).unwrap_err().to_string(),
            "Cannot resolve msgpack options endpoint (http://[::1)."
        );
    }
}
