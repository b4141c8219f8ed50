mod registration_attempt;
mod registration_flow;
mod registration_state;
mod submit_event;

pub use self::{
    registration_attempt::RegistrationAttempt, registration_flow::RegistrationFlow,
    registration_state::RegistrationState, submit_event::SubmitEvent,
};

/// Shown to the user once the relying party accepted the credential.
pub const SUCCESS_NOTICE: &str = "Passkey registered.";

/// The only failure indication shown to the user, details are logged.
pub const FAILURE_NOTICE: &str = "Passkey registration failed, please try again.";
