use crate::{
    attestation::SerializedCredential,
    authenticator::{Authenticator, create_credential},
    config::Config,
    error::Error,
    network::{Network, RelyingPartyApi},
    registration::{RegistrationAttempt, RegistrationState, SubmitEvent},
};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};

/// Drives registration attempts for a single form: fetches creation options, lets the
/// authenticator create a credential and submits it to the relying party. Only one attempt may
/// be in flight at a time.
pub struct RegistrationFlow<A: Authenticator> {
    config: Config,
    network: Network,
    authenticator: A,
    in_flight: AtomicBool,
}

impl<A: Authenticator> RegistrationFlow<A> {
    /// Creates a new registration flow.
    pub fn new(config: Config, network: Network, authenticator: A) -> Self {
        Self {
            config,
            network,
            authenticator,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Runs a registration attempt to completion. The returned attempt is always in a terminal
    /// state, an error is returned only if another attempt is still in flight.
    pub async fn register(&self, event: SubmitEvent) -> Result<RegistrationAttempt, Error> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            return Err(Error::attempt_in_progress(&event.form));
        };

        let mut attempt = RegistrationAttempt::new(event);
        info!(
            attempt.id = %attempt.id(),
            attempt.form = %attempt.event().form,
            options.format = %self.config.options_format,
            "Starting registration attempt submitted at {}.",
            attempt.event().submitted_at
        );

        match self.run(&mut attempt).await {
            Ok(()) => {
                attempt.transition(RegistrationState::Success);
                info!(
                    attempt.id = %attempt.id(),
                    attempt.form = %attempt.event().form,
                    "Registration attempt succeeded."
                );
            }
            Err(err) => {
                error!(
                    attempt.id = %attempt.id(),
                    attempt.form = %attempt.event().form,
                    error.kind = ?err.kind(),
                    "Registration attempt failed: {err:?}"
                );
                attempt.fail(err);
            }
        }

        Ok(attempt)
    }

    async fn run(&self, attempt: &mut RegistrationAttempt) -> Result<(), Error> {
        let api = RelyingPartyApi::new(&self.network, &self.config);

        attempt.transition(RegistrationState::FetchingOptions);
        let body = api.fetch_options().await.map_err(Error::transport)?;

        attempt.transition(RegistrationState::DecodingOptions);
        let options = self.config.options_format.decode(&body)?;

        attempt.transition(RegistrationState::AwaitingAuthenticator);
        let credential = create_credential(&self.authenticator, options).await?;

        attempt.transition(RegistrationState::Serializing);
        let credential = SerializedCredential::from(&credential);

        attempt.transition(RegistrationState::Submitting);
        api.submit_credential(&credential)
            .await
            .map_err(Error::transport)
    }
}

/// Holds the in-flight flag of a flow and releases it when dropped.
struct InFlightGuard<'a> {
    in_flight: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(in_flight: &'a AtomicBool) -> Option<Self> {
        in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { in_flight })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}
