use crate::buffers::{DecodeError, RawBuffer};
use base64::{
    Engine,
    alphabet,
    engine::{
        DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose::URL_SAFE_NO_PAD,
    },
};
use serde_derive::{Deserialize, Serialize};
use std::{fmt, ops::Deref};

/// Decoding engine that accepts both padded and unpadded input with lenient trailing bits. The
/// input is normalized to the URL-safe alphabet before decoding, so both standard and URL-safe
/// base64 texts are accepted.
const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// URL-safe, padding-free base64 text representing a [`RawBuffer`]. This is the only form binary
/// data takes in JSON.
#[derive(Serialize, Deserialize, Default, Debug, Eq, PartialEq, Clone, Hash)]
#[serde(transparent)]
pub struct EncodedBuffer(String);

impl EncodedBuffer {
    /// Encodes raw bytes. Never produces `+`, `/` or `=`.
    pub fn encode<B: AsRef<[u8]>>(buf: B) -> Self {
        Self(URL_SAFE_NO_PAD.encode(buf))
    }

    /// Decodes the text back into raw bytes. Standard base64 input is tolerated as well.
    pub fn decode(&self) -> Result<RawBuffer, DecodeError> {
        let normalized = self.0.replace('+', "-").replace('/', "_");
        Ok(RawBuffer::from(LENIENT_URL_SAFE.decode(normalized)?))
    }
}

impl From<String> for EncodedBuffer {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EncodedBuffer {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&RawBuffer> for EncodedBuffer {
    fn from(value: &RawBuffer) -> Self {
        Self::encode(value)
    }
}

impl TryFrom<&EncodedBuffer> for RawBuffer {
    type Error = DecodeError;

    fn try_from(value: &EncodedBuffer) -> Result<Self, Self::Error> {
        value.decode()
    }
}

impl Deref for EncodedBuffer {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for EncodedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::buffers::{DecodeError, EncodedBuffer, RawBuffer};

    fn is_url_safe(text: &str) -> bool {
        text.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    #[test]
    fn encodes_empty_buffer() -> anyhow::Result<()> {
        assert_eq!(&*EncodedBuffer::encode(b""), "");
        assert_eq!(EncodedBuffer::from("").decode()?, RawBuffer::default());

        Ok(())
    }

    #[test]
    fn encodes_with_url_safe_alphabet_and_no_padding() {
        // Standard base64 of these bytes is `+/8=` and `+/+/`.
        assert_eq!(&*EncodedBuffer::encode([0xfbu8, 0xff]), "-_8");
        assert_eq!(&*EncodedBuffer::encode([0xfbu8, 0xff, 0xbf]), "-_-_");
        assert_eq!(&*EncodedBuffer::encode(b"A"), "QQ");
        assert_eq!(&*EncodedBuffer::encode(b"AB"), "QUI");
        assert_eq!(&*EncodedBuffer::encode(b"ABC"), "QUJD");
    }

    #[test]
    fn round_trips_buffers_of_any_length() -> anyhow::Result<()> {
        let bytes = (0..=255u8).collect::<Vec<_>>();
        for len in 0..bytes.len() {
            let raw = RawBuffer::from(&bytes[..len]);
            let encoded = EncodedBuffer::from(&raw);
            assert!(is_url_safe(&encoded), "Unexpected character in `{encoded}`.");
            assert_eq!(encoded.decode()?, raw);
        }

        // All 3-byte windows of a byte ramp with high bits set hit every alphabet character.
        for start in 0..=253u8 {
            let raw = RawBuffer::from([start, start.wrapping_add(1), start.wrapping_add(2)]);
            assert_eq!(RawBuffer::try_from(&EncodedBuffer::from(&raw))?, raw);
        }

        Ok(())
    }

    #[test]
    fn decodes_standard_and_padded_input() -> anyhow::Result<()> {
        assert_eq!(EncodedBuffer::from("QQ").decode()?, RawBuffer::from(*b"A"));
        assert_eq!(EncodedBuffer::from("QQ==").decode()?, RawBuffer::from(*b"A"));
        assert_eq!(EncodedBuffer::from("Qg").decode()?, RawBuffer::from(*b"B"));
        assert_eq!(EncodedBuffer::from("Qw").decode()?, RawBuffer::from(*b"C"));
        assert_eq!(
            EncodedBuffer::from("+/8=").decode()?,
            RawBuffer::from([0xfb, 0xff])
        );
        assert_eq!(
            EncodedBuffer::from("-_8").decode()?,
            RawBuffer::from([0xfb, 0xff])
        );

        Ok(())
    }

    #[test]
    fn fails_to_decode_malformed_input() {
        assert_eq!(
            EncodedBuffer::from("Q!").decode(),
            Err(DecodeError(base64::DecodeError::InvalidByte(1, b'!')))
        );
        assert!(EncodedBuffer::from("Q").decode().is_err());
        assert!(EncodedBuffer::from("QQ Q").decode().is_err());
    }

    #[test]
    fn serialization() -> anyhow::Result<()> {
        assert_eq!(
            serde_json::to_string(&EncodedBuffer::encode([0u8, 1, 2]))?,
            r#""AAEC""#
        );
        assert_eq!(
            serde_json::from_str::<EncodedBuffer>(r#""AAEC""#)?,
            EncodedBuffer::from("AAEC")
        );

        Ok(())
    }
}
