//! Error types for peershell.

use thiserror::Error;

/// Main error type for peershell operations.
///
/// User-input mistakes (unknown command, missing filename) are never
/// represented here; the shell reports them as console diagnostics and
/// re-prompts. This type covers the failures that are allowed to
/// terminate the process: engine calls and terminal I/O.
#[derive(Error, Debug)]
pub enum PeerShellError {
    /// The external engine reported a failure.
    #[error(transparent)]
    Engine(#[from] crate::engine::EngineError),

    /// I/O error on the controlling terminal.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience Result type for peershell operations.
pub type Result<T> = std::result::Result<T, PeerShellError>;
