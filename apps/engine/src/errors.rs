use thiserror::Error;

/// Errors the engine surfaces to its caller.
///
/// Upstream AI failures are never represented here: the clients absorb them
/// and degrade to `AiOutcome::Unavailable` or an empty suggestion list.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Resume has no extracted text")]
    NoExtractedText,

    #[error("Storage error: {0}")]
    Storage(anyhow::Error),
}

impl EngineError {
    /// Short machine-readable code for request-layer mapping.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::NoExtractedText => "NO_EXTRACTED_TEXT",
            EngineError::Storage(_) => "STORAGE_ERROR",
        }
    }
}
