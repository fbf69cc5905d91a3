/// Errors that can occur in session operations.
///
/// Decode failures and unknown-board references are not errors — they are
/// absorbed as `Unrecognized`/`Ignored` outcomes. Only transport faults and
/// misuse of an ended session surface here.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Transport-level error. Fatal to the session.
    #[error("transport error: {0}")]
    Transport(#[from] relaydeck_transport::TransportError),

    /// A command was submitted while the session was not connected.
    #[error("session is not connected")]
    NotConnected,
}

pub type Result<T> = std::result::Result<T, SessionError>;
