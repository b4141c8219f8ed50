use crate::options::OptionsFormat;
use anyhow::Context;
use serde_derive::{Deserialize, Serialize};
use url::Url;

/// Location of the relying party endpoints that drive the registration ceremony.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RelyingPartyConfig {
    /// Base URL of the relying party. Endpoint paths are resolved against it, so it should end
    /// with a slash.
    #[serde(default = "default_url")]
    pub url: Url,
    /// Path of the endpoint that returns MessagePack creation options.
    #[serde(default = "default_options_path")]
    pub options_path: String,
    /// Path of the endpoint that returns JSON creation options.
    #[serde(default = "default_options_json_path")]
    pub options_json_path: String,
    /// Path of the endpoint that verifies the attested credential.
    #[serde(default = "default_submission_path")]
    pub submission_path: String,
}

impl RelyingPartyConfig {
    /// Resolves the options endpoint for the specified format.
    pub fn options_url(&self, format: OptionsFormat) -> anyhow::Result<Url> {
        let path = match format {
            OptionsFormat::MessagePack => &self.options_path,
            OptionsFormat::Json => &self.options_json_path,
        };
        self.url
            .join(path)
            .with_context(|| format!("Cannot resolve {format} options endpoint ({path})."))
    }

    /// Resolves the credential submission endpoint.
    pub fn submission_url(&self) -> anyhow::Result<Url> {
        self.url.join(&self.submission_path).with_context(|| {
            format!(
                "Cannot resolve submission endpoint ({}).",
                self.submission_path
            )
        })
    }
}

impl Default for RelyingPartyConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            options_path: default_options_path(),
            options_json_path: default_options_json_path(),
            submission_path: default_submission_path(),
        }
    }
}

fn default_url() -> Url {
    Url::parse("http://localhost:8080").expect("Cannot parse relying party URL parameter.")
}

fn default_options_path() -> String {
    "attestation".to_string()
}

fn default_options_json_path() -> String {
    "attestation/json".to_string()
}

fn default_submission_path() -> String {
    "attestation".to_string()
}
