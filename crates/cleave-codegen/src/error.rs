//! Code generation errors.

use cleave_core::CoreError;

/// Errors that can occur during boundary glue generation.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    /// The program source to partition is empty.
    #[error("program source is empty; nothing to partition")]
    EmptySource,

    /// A wrapper was requested for a function missing from the seen
    /// sequence. A wrapper needs at least its own target function there.
    #[error("function '{name}' is not in the seen sequence; cannot build its wrapper")]
    MissingFromSeen { name: String },

    /// Writing one artifact failed. Artifacts already written stay intact.
    #[error("failed to write artifact '{name}': {source}")]
    ArtifactWrite {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Registry construction or validation error.
    #[error("registry error: {0}")]
    Core(#[from] CoreError),

    /// I/O error outside a specific artifact write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, CodegenError>;
