/// Errors surfaced by a device session implementation.
///
/// `Clone` so test doubles can hold a prepared failure and hand out
/// copies of it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    /// The adapter answered with a non-success status word.
    #[error("command {command} returned status {status}")]
    Status { command: &'static str, status: String },

    /// The adapter did not answer in time.
    #[error("command {command} timed out")]
    Timeout { command: &'static str },

    /// The serial link is gone.
    #[error("session closed")]
    Closed,
}
