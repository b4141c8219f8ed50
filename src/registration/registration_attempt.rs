use crate::{
    error::Error,
    registration::{FAILURE_NOTICE, RegistrationState, SUCCESS_NOTICE, SubmitEvent},
};
use tracing::debug;
use uuid::Uuid;

/// A single run of the registration ceremony. Nothing is carried over between attempts.
#[derive(Debug)]
pub struct RegistrationAttempt {
    id: Uuid,
    event: SubmitEvent,
    history: Vec<RegistrationState>,
    error: Option<Error>,
}

impl RegistrationAttempt {
    /// Starts a new attempt in the `Idle` state.
    pub fn new(event: SubmitEvent) -> Self {
        Self {
            id: Uuid::now_v7(),
            event,
            history: vec![RegistrationState::Idle],
            error: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Submit event that started the attempt.
    pub fn event(&self) -> &SubmitEvent {
        &self.event
    }

    /// Current state of the attempt.
    pub fn state(&self) -> RegistrationState {
        self.history
            .last()
            .copied()
            .unwrap_or(RegistrationState::Idle)
    }

    /// All states the attempt went through, in order.
    pub fn history(&self) -> &[RegistrationState] {
        &self.history
    }

    /// Error that failed the attempt, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Notice for the user: the success notice once the credential is accepted, the generic
    /// failure notice otherwise.
    pub fn notice(&self) -> Result<&'static str, &'static str> {
        match self.state() {
            RegistrationState::Success => Ok(SUCCESS_NOTICE),
            _ => Err(FAILURE_NOTICE),
        }
    }

    pub(super) fn transition(&mut self, state: RegistrationState) {
        debug!(
            attempt.id = %self.id,
            attempt.form = %self.event.form,
            "Registration attempt moves from {:?} to {state:?}.",
            self.state()
        );
        self.history.push(state);
    }

    pub(super) fn fail(&mut self, error: Error) {
        self.transition(RegistrationState::Failed(error.kind()));
        self.error = Some(error);
    }
}
