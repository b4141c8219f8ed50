use crate::buffers::DecodeError;

/// Describes why the relying party's creation options cannot be turned into authenticator
/// options.
#[derive(thiserror::Error, Debug)]
pub enum OptionsError {
    /// A required binary field (`challenge` or `user.id`) is absent.
    #[error("Creation options are missing required field `{0}`.")]
    MissingField(&'static str),
    /// A binary field holds text that isn't valid base64.
    #[error("Creation options field `{field}` cannot be decoded.")]
    Decode {
        field: String,
        #[source]
        source: DecodeError,
    },
    /// The body isn't a valid MessagePack map of creation options.
    #[error("Cannot deserialize MessagePack creation options: {0}")]
    MessagePack(#[from] rmp_serde::decode::Error),
    /// The body isn't a valid JSON object of creation options.
    #[error("Cannot deserialize JSON creation options: {0}")]
    Json(#[from] serde_json::Error),
}
