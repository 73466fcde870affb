use std::path::Path;

use async_trait::async_trait;

use crate::domain::Document;

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, path: &Path, document: &Document)
        -> Result<String, ExtractionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("could not extract readable text: {0}")]
    Unreadable(String),
    #[error("io error: {0}")]
    Io(String),
}
