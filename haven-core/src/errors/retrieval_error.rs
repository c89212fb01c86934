/// Candidate retrieval errors. Zero results is never one of these.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("candidate source unavailable: {source_name}: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    #[error("candidate source failed at {level} level: {reason}")]
    SourceFailed { level: String, reason: String },

    #[error("query embedding failed: {reason}")]
    EmbeddingFailed { reason: String },
}
