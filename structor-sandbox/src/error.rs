//! Error types for the sandbox crate.

/// Errors that can occur while handling a sandbox operation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SandboxError {
    /// The operation or one of its collaborators rejected the request.
    ///
    /// The message is passed through verbatim.
    #[error("{0}")]
    Rejected(String),

    /// The options record did not match the operation's expected fields.
    #[error("invalid options for {method}: {reason}")]
    InvalidOptions { method: &'static str, reason: String },

    /// No operation is registered under the requested name.
    #[error("unknown method: {0}")]
    UnknownMethod(String),

    /// A remote collaborator could not be reached or answered garbage.
    #[error("collaborator transport failed: {0}")]
    Transport(String),

    /// Underlying I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Domain validation error.
    #[error(transparent)]
    Core(#[from] structor_core::CoreError),
}
