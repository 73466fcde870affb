use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use tanglin::application::ports::{
    ExtractionError, InferenceError, TextExtractor, TextSplitter,
};
use tanglin::application::services::{AnalysisFailure, AnalysisService};
use tanglin::domain::{Document, DocumentKind, NO_ANALYSIS_AVAILABLE};
use tanglin::infrastructure::llm::MockInferenceBackend;
use tanglin::infrastructure::text_processing::SentenceSplitter;

const MAX_ANALYZED_CHUNKS: usize = 3;
const CALL_TIMEOUT: Duration = Duration::from_secs(1);

struct FixedTextExtractor {
    text: String,
}

#[async_trait]
impl TextExtractor for FixedTextExtractor {
    async fn extract(&self, _path: &Path, _doc: &Document) -> Result<String, ExtractionError> {
        Ok(self.text.clone())
    }
}

struct FailingExtractor {
    error: fn() -> ExtractionError,
}

#[async_trait]
impl TextExtractor for FailingExtractor {
    async fn extract(&self, _path: &Path, _doc: &Document) -> Result<String, ExtractionError> {
        Err((self.error)())
    }
}

fn service(
    text: &str,
    backend: Arc<MockInferenceBackend>,
    max_chunk_size: usize,
) -> AnalysisService {
    AnalysisService::new(
        Arc::new(FixedTextExtractor {
            text: text.to_string(),
        }),
        Arc::new(SentenceSplitter::new(max_chunk_size)),
        backend,
        MAX_ANALYZED_CHUNKS,
        CALL_TIMEOUT,
    )
}

fn pdf_document() -> Document {
    Document::new("report.pdf".to_string(), DocumentKind::Pdf, 1024)
}

/// Text that splits into exactly N single-sentence chunks under a 400-char
/// bound: each sentence is 300 chars, so no two pack together.
fn n_chunk_text(n: usize) -> String {
    (0..n)
        .map(|i| {
            let letter = (b'a' + i as u8) as char;
            format!("{}.", letter.to_string().repeat(300))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[tokio::test]
async fn given_backend_failing_every_chunk_then_result_is_success_with_sentinel_summary() {
    let backend = Arc::new(MockInferenceBackend::new());
    backend.push_response(Err(InferenceError::Status(500)));
    backend.push_response(Err(InferenceError::Status(500)));

    let service = service(&n_chunk_text(2), Arc::clone(&backend), 400);
    let result = service
        .analyze(Path::new("report.pdf"), &pdf_document())
        .await
        .unwrap();

    assert_eq!(result.chunks_processed, 2);
    assert_eq!(result.summary, NO_ANALYSIS_AVAILABLE);
    assert!(result.points.is_empty());
    // Zero points means no aggregation call either.
    assert_eq!(backend.complete_calls(), 2);
}

#[tokio::test]
async fn given_five_chunks_then_at_most_three_are_sent_to_the_backend() {
    let backend = Arc::new(MockInferenceBackend::new());
    for i in 0..3 {
        backend.push_response(Ok(Some(format!("finding {i}"))));
    }
    backend.push_response(Ok(Some("condensed summary".to_string())));

    let service = service(&n_chunk_text(5), Arc::clone(&backend), 400);
    let result = service
        .analyze(Path::new("report.pdf"), &pdf_document())
        .await
        .unwrap();

    assert_eq!(result.chunks_processed, 5);
    assert_eq!(result.points.len(), 3);
    assert_eq!(result.summary, "condensed summary");
    // Three chunk calls plus one aggregation call.
    assert_eq!(backend.complete_calls(), 4);
}

#[tokio::test]
async fn given_exactly_one_point_then_summary_is_that_point_without_a_second_call() {
    let backend = Arc::new(MockInferenceBackend::new());
    backend.push_response(Ok(Some("the only finding".to_string())));

    let text = "The quick brown fox jumps over the lazy dog near the river bank every day.";
    let service = service(text, Arc::clone(&backend), 400);
    let result = service
        .analyze(Path::new("report.pdf"), &pdf_document())
        .await
        .unwrap();

    assert_eq!(result.chunks_processed, 1);
    assert_eq!(result.summary, "Section 1:\nthe only finding");
    assert_eq!(backend.complete_calls(), 1);
}

#[tokio::test]
async fn given_two_points_when_aggregation_fails_then_summary_is_the_fixed_fallback() {
    let backend = Arc::new(MockInferenceBackend::new());
    backend.push_response(Ok(Some("finding one".to_string())));
    backend.push_response(Ok(Some("finding two".to_string())));
    backend.push_response(Err(InferenceError::Timeout));

    let service = service(&n_chunk_text(2), Arc::clone(&backend), 400);
    let result = service
        .analyze(Path::new("report.pdf"), &pdf_document())
        .await
        .unwrap();

    assert_eq!(result.summary, "Could not create summary");
    assert_eq!(result.points.len(), 2);
}

#[tokio::test]
async fn given_partial_chunk_failures_then_failed_chunks_are_omitted_from_points() {
    let backend = Arc::new(MockInferenceBackend::new());
    backend.push_response(Ok(Some("finding one".to_string())));
    backend.push_response(Err(InferenceError::Connection("refused".to_string())));

    let service = service(&n_chunk_text(2), Arc::clone(&backend), 400);
    let result = service
        .analyze(Path::new("report.pdf"), &pdf_document())
        .await
        .unwrap();

    assert_eq!(result.points.len(), 1);
    assert_eq!(result.points[0].section, 1);
    // A single surviving point short-circuits aggregation.
    assert_eq!(result.summary, "Section 1:\nfinding one");
}

#[tokio::test]
async fn given_unsupported_extractor_error_then_failure_is_unsupported_file_type() {
    let service = AnalysisService::new(
        Arc::new(FailingExtractor {
            error: || ExtractionError::UnsupportedFileType("docx".to_string()),
        }),
        Arc::new(SentenceSplitter::new(400)),
        Arc::new(MockInferenceBackend::new()),
        MAX_ANALYZED_CHUNKS,
        CALL_TIMEOUT,
    );

    let failure = service
        .analyze(Path::new("report.docx"), &pdf_document())
        .await
        .unwrap_err();

    assert_eq!(failure, AnalysisFailure::UnsupportedFileType);
}

#[tokio::test]
async fn given_short_extracted_text_then_failure_is_unreadable_text() {
    let backend = Arc::new(MockInferenceBackend::new());
    let service = service("too short", backend, 400);

    let failure = service
        .analyze(Path::new("report.pdf"), &pdf_document())
        .await
        .unwrap_err();

    assert_eq!(failure, AnalysisFailure::UnreadableText);
}
