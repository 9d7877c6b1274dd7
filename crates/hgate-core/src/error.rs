use thiserror::Error;

pub type HgateResult<T> = Result<T, HgateError>;

/// Error taxonomy for the honey-authentication core.
///
/// A wrong password is deliberately NOT represented here: password mismatch
/// is a successful login that returns a decoy identity. Only the absence of
/// any record to answer with (`UserNotFound`) is observable to a caller.
#[derive(Debug, Error)]
pub enum HgateError {
    #[error("user already exists")]
    AlreadyExists,

    #[error("user not found")]
    UserNotFound,

    /// DTE contract misuse: the message is not a member of the configured
    /// message space. Not reachable through the login flow.
    #[error("message is not in the configured message space")]
    UnknownMessage,

    /// Credential store I/O fault. Fatal and propagated as-is; never mapped
    /// into a decoy response.
    #[error("storage error: {0}")]
    Storage(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
