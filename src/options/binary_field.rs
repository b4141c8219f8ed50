use crate::buffers::{DecodeError, EncodedBuffer, RawBuffer};

/// Representation of a binary field in a wire format of the creation options. Binary encodings
/// carry raw bytes as is, while JSON carries them as base64url text that must be decoded before
/// the options are handed to the authenticator.
pub trait BinaryField {
    fn into_raw_buffer(self) -> Result<RawBuffer, DecodeError>;
}

impl BinaryField for RawBuffer {
    fn into_raw_buffer(self) -> Result<RawBuffer, DecodeError> {
        Ok(self)
    }
}

impl BinaryField for EncodedBuffer {
    fn into_raw_buffer(self) -> Result<RawBuffer, DecodeError> {
        self.decode()
    }
}
