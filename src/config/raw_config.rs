use crate::{
    config::{AuthenticatorConfig, HttpConfig, RelyingPartyConfig},
    options::OptionsFormat,
};
use figment::{Figment, Metadata, Profile, Provider, providers, providers::Format, value};
use serde_derive::{Deserialize, Serialize};

/// Raw configuration structure that is used to read the configuration from the file.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct RawConfig {
    /// Wire format of the creation options requested from the relying party.
    #[serde(default)]
    pub options_format: OptionsFormat,
    /// Configuration of the relying party endpoints.
    #[serde(default)]
    pub relying_party: RelyingPartyConfig,
    /// Configuration for the HTTP functionality.
    #[serde(default)]
    pub http: HttpConfig,
    /// Configuration of the authenticator program.
    #[serde(default)]
    pub authenticator: AuthenticatorConfig,
}

impl RawConfig {
    /// Reads the configuration from the file (TOML) and merges it with the default values and
    /// the environment variables.
    pub fn read_from_file(path: &str) -> anyhow::Result<Self> {
        Ok(Figment::from(RawConfig::default())
            .merge(providers::Toml::file(path))
            .merge(providers::Env::prefixed("PASSKEY_REGISTRAR_").split("__"))
            .extract()?)
    }
}

impl Provider for RawConfig {
    fn metadata(&self) -> Metadata {
        Metadata::named("Passkey registrar main configuration")
    }

    fn data(&self) -> Result<value::Map<Profile, value::Dict>, figment::Error> {
        providers::Serialized::defaults(Self::default()).data()
    }
}
