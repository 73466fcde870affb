use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    ExtractionError, InferenceBackend, TextExtractor, TextSplitter,
};
use crate::domain::{AnalysisPoint, Document, DocumentAnalysis, NO_ANALYSIS_AVAILABLE};

/// Extracted text shorter than this counts as an extraction failure.
const MIN_READABLE_LEN: usize = 50;

const SUMMARY_FALLBACK: &str = "Could not create summary";

/// Drives the document pipeline: extract, chunk, analyze chunk-by-chunk,
/// aggregate. Backend failures on individual chunks are recovered locally;
/// only extraction-level problems surface as an `AnalysisFailure`.
pub struct AnalysisService {
    extractor: Arc<dyn TextExtractor>,
    splitter: Arc<dyn TextSplitter>,
    backend: Arc<dyn InferenceBackend>,
    max_analyzed_chunks: usize,
    call_timeout: Duration,
}

impl AnalysisService {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        splitter: Arc<dyn TextSplitter>,
        backend: Arc<dyn InferenceBackend>,
        max_analyzed_chunks: usize,
        call_timeout: Duration,
    ) -> Self {
        Self {
            extractor,
            splitter,
            backend,
            max_analyzed_chunks,
            call_timeout,
        }
    }

    #[tracing::instrument(skip(self), fields(filename = %document.filename, kind = document.kind.as_str()))]
    pub async fn analyze(
        &self,
        path: &Path,
        document: &Document,
    ) -> Result<DocumentAnalysis, AnalysisFailure> {
        let text = match self.extractor.extract(path, document).await {
            Ok(text) => text,
            Err(ExtractionError::UnsupportedFileType(_)) => {
                return Err(AnalysisFailure::UnsupportedFileType);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Text extraction failed");
                return Err(AnalysisFailure::UnreadableText);
            }
        };

        if text.trim().len() < MIN_READABLE_LEN {
            return Err(AnalysisFailure::UnreadableText);
        }

        let chunks = self
            .splitter
            .split(&text)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Chunking failed");
                AnalysisFailure::NoContent
            })?;

        if chunks.is_empty() {
            return Err(AnalysisFailure::NoContent);
        }

        // Latency bound: only the leading chunks are ever analyzed, strictly
        // in order, one in-flight call at a time.
        let analyzed = self.max_analyzed_chunks.min(chunks.len());
        let mut points = Vec::new();

        for chunk in &chunks[..analyzed] {
            tracing::info!(ordinal = chunk.ordinal, total = analyzed, "Analyzing chunk");
            match self
                .backend
                .complete(&build_chunk_prompt(&chunk.text), self.call_timeout)
                .await
            {
                Ok(Some(content)) => points.push(AnalysisPoint::new(chunk.ordinal, content)),
                Ok(None) => {
                    tracing::warn!(ordinal = chunk.ordinal, "Backend returned no content for chunk");
                }
                Err(e) => {
                    tracing::warn!(ordinal = chunk.ordinal, error = %e, "Chunk analysis failed");
                }
            }
        }

        let summary = self.aggregate(&points).await;

        Ok(DocumentAnalysis {
            chunks_processed: chunks.len(),
            summary,
            points,
        })
    }

    /// Zero points yield the fixed sentinel, a single point is returned
    /// verbatim without a second backend call, anything more is condensed by
    /// one additional call.
    async fn aggregate(&self, points: &[AnalysisPoint]) -> String {
        match points {
            [] => NO_ANALYSIS_AVAILABLE.to_string(),
            [only] => only.render(),
            _ => {
                let rendered: Vec<String> = points.iter().map(AnalysisPoint::render).collect();
                match self
                    .backend
                    .complete(&build_summary_prompt(&rendered.join("\n\n")), self.call_timeout)
                    .await
                {
                    Ok(Some(summary)) => summary,
                    Ok(None) => SUMMARY_FALLBACK.to_string(),
                    Err(e) => {
                        tracing::warn!(error = %e, "Summary aggregation failed");
                        SUMMARY_FALLBACK.to_string()
                    }
                }
            }
        }
    }
}

fn build_chunk_prompt(chunk_text: &str) -> String {
    format!(
        "Please read this text and extract the most important points as bullet points:\n\n\
         Text: {chunk_text}\n\nKey points:\n•"
    )
}

fn build_summary_prompt(combined_points: &str) -> String {
    format!(
        "Based on these key points from a document, create a brief summary:\n\n\
         {combined_points}\n\nSummary:"
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisFailure {
    #[error("Unsupported file type")]
    UnsupportedFileType,
    #[error("Could not extract readable text from the document")]
    UnreadableText,
    #[error("No content to analyze")]
    NoContent,
}
