//! Core error types.

/// Errors that can occur while building the classification model.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Two classified functions share a simple name.
    #[error("duplicate simple name '{simple}' (from '{first}' and '{second}')")]
    DuplicateSimpleName {
        simple: String,
        first: String,
        second: String,
    },

    /// A labeled function is missing from the seen sequence.
    #[error("function '{name}' is classified but was never seen executing")]
    NotSeen { name: String },

    /// Failed to validate a classification manifest.
    #[error("invalid classification manifest: {detail}")]
    InvalidManifest { detail: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
