use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{ExtractionError, TextExtractor};
use crate::domain::{Document, DocumentKind};

/// Dispatches extraction to the adapter registered for the document's kind.
pub struct CompositeExtractor {
    adapters: HashMap<DocumentKind, Arc<dyn TextExtractor>>,
}

impl CompositeExtractor {
    pub fn new(adapters: Vec<(DocumentKind, Arc<dyn TextExtractor>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }
}

#[async_trait]
impl TextExtractor for CompositeExtractor {
    async fn extract(
        &self,
        path: &Path,
        document: &Document,
    ) -> Result<String, ExtractionError> {
        let adapter = self.adapters.get(&document.kind).ok_or_else(|| {
            ExtractionError::UnsupportedFileType(document.kind.as_str().to_string())
        })?;

        adapter.extract(path, document).await
    }
}
