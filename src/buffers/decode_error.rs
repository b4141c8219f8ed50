/// Error returned when a text cannot be decoded into a raw buffer.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot decode base64 buffer: {0}")]
pub struct DecodeError(#[from] pub base64::DecodeError);
