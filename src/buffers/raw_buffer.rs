use serde_derive::{Deserialize, Serialize};
use std::ops::Deref;

/// An opaque sequence of bytes (challenge, user handle, credential ID, etc.). Serialized as a
/// native byte string by the binary encodings.
#[derive(Serialize, Deserialize, Default, Debug, Eq, PartialEq, Clone, Hash)]
pub struct RawBuffer(#[serde(with = "serde_bytes")] Vec<u8>);

impl From<Vec<u8>> for RawBuffer {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for RawBuffer {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for RawBuffer {
    fn from(value: [u8; N]) -> Self {
        Self(value.to_vec())
    }
}

impl Deref for RawBuffer {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for RawBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
