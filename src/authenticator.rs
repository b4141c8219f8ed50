mod authenticator_error;
mod command_authenticator;
mod credential;

pub use self::{
    authenticator_error::AuthenticatorError,
    command_authenticator::CommandAuthenticator,
    credential::{AttestationResponse, Credential},
};
#[cfg(test)]
pub use self::authenticator_error::AuthenticatorErrorName;
use crate::options::CreationOptions;
use futures::future::BoxFuture;
use tracing::debug;

/// Capability to create a new public key credential on a platform or roaming authenticator.
pub trait Authenticator: Sync + Send + 'static {
    fn create(
        &self,
        options: CreationOptions,
    ) -> BoxFuture<'_, Result<Credential, AuthenticatorError>>;
}

/// Asks the authenticator for a new credential. The call suspends until the authenticator either
/// creates the credential or rejects the request. Rejections are returned as is.
pub async fn create_credential<A: Authenticator>(
    authenticator: &A,
    options: CreationOptions,
) -> Result<Credential, AuthenticatorError> {
    debug!(
        options.timeout = options.timeout,
        options.exclude_credentials = options.exclude_credentials.as_ref().map_or(0, Vec::len),
        "Requesting a new credential from the authenticator."
    );

    let credential = authenticator.create(options).await?;
    debug!(
        credential.id = %credential.id,
        "Authenticator created a new credential."
    );

    Ok(credential)
}
