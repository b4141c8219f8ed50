mod error_kind;

use crate::{authenticator::AuthenticatorError, options::OptionsError};
use anyhow::anyhow;
use std::fmt::{Debug, Display, Formatter};

pub use error_kind::ErrorKind;

/// Registrar native error type.
#[derive(thiserror::Error)]
pub struct Error {
    root_cause: anyhow::Error,
    kind: ErrorKind,
}

impl Error {
    /// Creates a Decode error instance with the given root cause.
    pub fn decode(root_cause: anyhow::Error) -> Self {
        Self {
            root_cause,
            kind: ErrorKind::Decode,
        }
    }

    /// Creates a Malformed Options error instance with the given root cause.
    pub fn malformed_options(root_cause: anyhow::Error) -> Self {
        Self {
            root_cause,
            kind: ErrorKind::MalformedOptions,
        }
    }

    /// Creates an Authenticator error instance with the given root cause.
    pub fn authenticator(root_cause: anyhow::Error) -> Self {
        Self {
            root_cause,
            kind: ErrorKind::Authenticator,
        }
    }

    /// Creates a Transport error instance with the given root cause.
    pub fn transport(root_cause: anyhow::Error) -> Self {
        Self {
            root_cause,
            kind: ErrorKind::Transport,
        }
    }

    /// Creates an error instance for a submit that arrived while another attempt is running.
    pub fn attempt_in_progress<M>(form: M) -> Self
    where
        M: Display,
    {
        Self {
            root_cause: anyhow!("Registration attempt for form `{form}` is already in progress."),
            kind: ErrorKind::AttemptInProgress,
        }
    }

    /// Kind of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.root_cause, f)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.root_cause, f)
    }
}

impl From<OptionsError> for Error {
    fn from(err: OptionsError) -> Self {
        match err {
            OptionsError::Decode { .. } => Self::decode(err.into()),
            OptionsError::MissingField(_) | OptionsError::MessagePack(_) | OptionsError::Json(_) => {
                Self::malformed_options(err.into())
            }
        }
    }
}

impl From<AuthenticatorError> for Error {
    fn from(err: AuthenticatorError) -> Self {
        Self::authenticator(err.into())
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        err.downcast::<Error>().unwrap_or_else(|root_cause| Error {
            root_cause,
            kind: ErrorKind::Unknown,
        })
    }
}
