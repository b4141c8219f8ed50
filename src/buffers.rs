mod decode_error;
mod encoded_buffer;
mod raw_buffer;

pub use self::{decode_error::DecodeError, encoded_buffer::EncodedBuffer, raw_buffer::RawBuffer};
