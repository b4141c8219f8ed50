use crate::error::ErrorKind;

/// Stage of a registration attempt. Stages only move forward, every attempt ends in either
/// `Success` or `Failed`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RegistrationState {
    Idle,
    FetchingOptions,
    DecodingOptions,
    AwaitingAuthenticator,
    Serializing,
    Submitting,
    /// The relying party accepted the credential with `200 OK`.
    Success,
    Failed(ErrorKind),
}
