/// Describes why a registration attempt failed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A binary field holds malformed base64 text.
    Decode,
    /// The creation options lack a required field or can't be parsed at all.
    MalformedOptions,
    /// The authenticator rejected or aborted credential creation.
    Authenticator,
    /// The relying party couldn't be reached or responded with an unexpected status.
    Transport,
    /// Another attempt for the same form is still in flight.
    AttemptInProgress,
    /// Unknown error.
    Unknown,
}
