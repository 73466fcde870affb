use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{ExtractionError, TextExtractor};
use crate::domain::{Document, DocumentKind};

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// PDF text extraction with a primary and a secondary method: `pdf-extract`
/// first, falling back to page-by-page extraction via `lopdf` when the
/// primary result is empty or errors.
#[derive(Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_blocking(path: &Path) -> Result<String, ExtractionError> {
        let primary = pdf_extract::extract_text(path);

        match primary {
            Ok(text) if !text.trim().is_empty() => return Ok(text.trim().to_string()),
            Ok(_) => {
                tracing::debug!("Primary PDF extraction produced no text, trying secondary");
            }
            Err(e) => {
                tracing::debug!(error = %e, "Primary PDF extraction failed, trying secondary");
            }
        }

        Self::extract_with_lopdf(path)
    }

    fn extract_with_lopdf(path: &Path) -> Result<String, ExtractionError> {
        let doc = lopdf::Document::load(path)
            .map_err(|e| ExtractionError::Unreadable(format!("failed to parse PDF: {e}")))?;

        let mut pages = Vec::new();
        for page_number in doc.get_pages().keys() {
            match doc.extract_text(&[*page_number]) {
                Ok(text) if !text.trim().is_empty() => pages.push(text.trim().to_string()),
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(page = page_number, error = %e, "Page extraction failed");
                }
            }
        }

        if pages.is_empty() {
            return Err(ExtractionError::Unreadable(
                "no readable text on any page".to_string(),
            ));
        }

        Ok(pages.join("\n"))
    }
}

#[async_trait]
impl TextExtractor for PdfExtractor {
    #[tracing::instrument(skip(self, document), fields(filename = %document.filename))]
    async fn extract(
        &self,
        path: &Path,
        document: &Document,
    ) -> Result<String, ExtractionError> {
        if document.kind != DocumentKind::Pdf {
            return Err(ExtractionError::UnsupportedFileType(
                document.kind.as_str().to_string(),
            ));
        }

        let path = path.to_path_buf();
        let text = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_blocking(&path)),
        )
        .await
        .map_err(|_| ExtractionError::Unreadable("PDF extraction timed out".to_string()))?
        .map_err(|e| ExtractionError::Io(format!("task join error: {e}")))??;

        tracing::info!(chars = text.len(), "PDF text extraction complete");
        Ok(text)
    }
}
