//! Extraction error types.

/// Errors that can occur when selecting an extraction strategy.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The guest language id does not name a supported language.
    #[error("unsupported guest language '{id}'")]
    UnknownLanguage { id: String },
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
