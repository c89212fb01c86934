mod config_error;
mod retrieval_error;

pub use config_error::ConfigError;
pub use retrieval_error::RetrievalError;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum HavenError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("explanation generation failed: {reason}")]
    ExplanationFailed { reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HavenError {
    /// True when the search backend itself is at fault, as opposed to a
    /// search that legitimately found nothing.
    pub fn is_service_fault(&self) -> bool {
        matches!(self, Self::Retrieval(_))
    }
}

pub type HavenResult<T> = Result<T, HavenError>;
