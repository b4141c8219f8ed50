use time::OffsetDateTime;

/// User-initiated submit that starts a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitEvent {
    /// Name of the submitted form.
    pub form: String,
    pub submitted_at: OffsetDateTime,
}

impl SubmitEvent {
    /// Creates a submit event for the specified form that happened just now.
    pub fn new(form: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            submitted_at: OffsetDateTime::now_utc(),
        }
    }
}
