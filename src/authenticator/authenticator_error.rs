use serde_derive::Deserialize;
use std::fmt;

/// Reason the platform gives for refusing or aborting credential creation.
#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum AuthenticatorErrorName {
    /// The user cancelled the ceremony or it timed out.
    NotAllowedError,
    /// One of the excluded credentials is already registered on the authenticator.
    InvalidStateError,
    /// None of the requested credential parameters are supported.
    NotSupportedError,
    /// The relying party ID isn't valid for the caller's origin.
    SecurityError,
    AbortError,
    ConstraintError,
    #[serde(other)]
    UnknownError,
}

impl AuthenticatorErrorName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAllowedError => "NotAllowedError",
            Self::InvalidStateError => "InvalidStateError",
            Self::NotSupportedError => "NotSupportedError",
            Self::SecurityError => "SecurityError",
            Self::AbortError => "AbortError",
            Self::ConstraintError => "ConstraintError",
            Self::UnknownError => "UnknownError",
        }
    }
}

impl fmt::Display for AuthenticatorErrorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticator rejected or aborted credential creation. Terminal for the attempt.
#[derive(thiserror::Error, Deserialize, Debug, Clone, PartialEq, Eq)]
#[error("{name}: {message}")]
pub struct AuthenticatorError {
    pub name: AuthenticatorErrorName,
    #[serde(default)]
    pub message: String,
}

impl AuthenticatorError {
    pub fn new(name: AuthenticatorErrorName, message: impl Into<String>) -> Self {
        Self {
            name,
            message: message.into(),
        }
    }

    /// Error that the platform didn't classify.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(AuthenticatorErrorName::UnknownError, message)
    }
}
