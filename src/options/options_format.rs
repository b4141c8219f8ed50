use crate::options::{CreationOptions, OptionsError};
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Wire encoding the relying party uses to deliver creation options.
#[derive(Serialize, Deserialize, Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OptionsFormat {
    /// Self-describing binary map, binary fields are raw bytes.
    #[default]
    #[serde(rename = "msgpack")]
    MessagePack,
    /// JSON object, binary fields are base64url strings.
    Json,
}

impl OptionsFormat {
    /// Media type the relying party is expected to respond with.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::MessagePack => "application/x-msgpack",
            Self::Json => "application/json",
        }
    }

    /// Detects the format named by a `Content-Type` header value, parameters are ignored.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let media_type = content_type.split(';').next().unwrap_or_default().trim();
        [Self::MessagePack, Self::Json]
            .into_iter()
            .find(|format| media_type.eq_ignore_ascii_case(format.content_type()))
    }

    /// Decodes the response body into authenticator-ready creation options.
    pub fn decode(&self, body: &[u8]) -> Result<CreationOptions, OptionsError> {
        match self {
            Self::MessagePack => CreationOptions::from_msgpack(body),
            Self::Json => CreationOptions::from_json(body),
        }
    }
}

impl fmt::Display for OptionsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MessagePack => "msgpack",
            Self::Json => "json",
        })
    }
}
