use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::application::ports::{FileRegistry, InferenceBackend, InferenceError};
use crate::application::services::{
    AnalysisFailure, AnalysisService, DegradedCause, FallbackResponder,
};
use crate::domain::{ChatFrame, ChatTurn, Document, DocumentKind, OwnerId, UploadedFileRecord};

/// Keywords that route a chat turn into the document-analysis pipeline
/// instead of the chat proxy.
const ANALYSIS_ROUTE_KEYWORDS: &[&str] = &[
    "analyze",
    "pdf",
    "excel",
    "spreadsheet",
    "document",
    "summary",
    "points",
    "data",
];

const NO_RESPONSE_SENTINEL: &str = "No response from AI model";

const NO_DOCUMENTS_REPLY: &str = "No documents uploaded yet. Please upload a PDF or Excel \
                                  file first, then ask me to analyze it.";

/// Bound on frames buffered between the backend reader and the response
/// writer; the reader blocks once the consumer stops draining.
const STREAM_CHANNEL_CAPACITY: usize = 32;

/// The reply for one chat turn: either a single buffered string or a
/// pull-driven sequence of frames ending with the first done or error frame.
pub enum ChatOutcome {
    Reply(String),
    Stream(ReceiverStream<ChatFrame>),
}

/// Routes chat turns between the document pipeline, the inference backend
/// proxy, and the deterministic fallback. A backend outage is always
/// surfaced as a degraded but coherent reply, never as an error.
pub struct ChatService {
    analysis: Arc<AnalysisService>,
    backend: Arc<dyn InferenceBackend>,
    registry: Arc<dyn FileRegistry>,
    responder: FallbackResponder,
    chat_timeout: Duration,
}

impl ChatService {
    pub fn new(
        analysis: Arc<AnalysisService>,
        backend: Arc<dyn InferenceBackend>,
        registry: Arc<dyn FileRegistry>,
        responder: FallbackResponder,
        chat_timeout: Duration,
    ) -> Self {
        Self {
            analysis,
            backend,
            registry,
            responder,
            chat_timeout,
        }
    }

    #[tracing::instrument(skip(self, turn), fields(stream = turn.stream_requested))]
    pub async fn handle(&self, turn: &ChatTurn, owner: Option<&OwnerId>) -> ChatOutcome {
        let lower = turn.message.to_lowercase();
        if ANALYSIS_ROUTE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            // The analysis path always replies buffered, even when streaming
            // was requested.
            return ChatOutcome::Reply(self.analyze_latest_upload(owner).await);
        }

        if turn.stream_requested {
            self.proxy_stream(&turn.message, owner).await
        } else {
            self.proxy_buffered(&turn.message, owner).await
        }
    }

    async fn proxy_buffered(&self, message: &str, owner: Option<&OwnerId>) -> ChatOutcome {
        match self.backend.complete(message, self.chat_timeout).await {
            Ok(Some(reply)) => ChatOutcome::Reply(reply),
            Ok(None) => ChatOutcome::Reply(NO_RESPONSE_SENTINEL.to_string()),
            Err(e) => ChatOutcome::Reply(self.fallback_reply(message, owner, &e).await),
        }
    }

    async fn proxy_stream(&self, message: &str, owner: Option<&OwnerId>) -> ChatOutcome {
        let mut frames = match self.backend.complete_stream(message, self.chat_timeout).await {
            Ok(frames) => frames,
            Err(e) => {
                // Dispatch failed before any frame was delivered, so the
                // caller still gets a buffered fallback reply.
                return ChatOutcome::Reply(self.fallback_reply(message, owner, &e).await);
            }
        };

        let (tx, rx) = mpsc::channel(STREAM_CHANNEL_CAPACITY);

        tokio::spawn(async move {
            let mut full_content = String::new();

            while let Some(item) = frames.next().await {
                match item {
                    Ok(frame) => {
                        if let Some(content) = frame.content {
                            full_content.push_str(&content);
                            if tx.send(ChatFrame::Content(content)).await.is_err() {
                                // Consumer stopped reading; dropping the
                                // backend stream closes the connection.
                                return;
                            }
                        }
                        if frame.done {
                            let _ = tx.send(ChatFrame::Done { full_content }).await;
                            return;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Streaming chat failed mid-stream");
                        let _ = tx.send(ChatFrame::Error(e.to_string())).await;
                        return;
                    }
                }
            }

            // Backend closed the stream without a done marker; still emit a
            // terminal frame so clients can stop buffering.
            let _ = tx.send(ChatFrame::Done { full_content }).await;
        });

        ChatOutcome::Stream(ReceiverStream::new(rx))
    }

    async fn analyze_latest_upload(&self, owner: Option<&OwnerId>) -> String {
        let files = self.visible_files(owner).await;

        let Some(latest) = files.into_iter().max_by_key(|r| r.uploaded_at) else {
            return NO_DOCUMENTS_REPLY.to_string();
        };

        let Some(kind) = DocumentKind::from_filename(&latest.filename) else {
            return format!(
                "Could not analyze document: {}",
                AnalysisFailure::UnsupportedFileType
            );
        };

        let document = Document::new(latest.filename.clone(), kind, latest.size_bytes);
        tracing::info!(filename = %latest.filename, "Analyzing most recent upload");

        match self.analysis.analyze(&latest.path, &document).await {
            Ok(result) => format!(
                "{} analysis complete for \"{}\"\n\nSummary:\n{}\n\nProcessed {} sections \
                 of the document.\n\nYou can ask me specific questions about the content!",
                kind.as_str(),
                latest.filename,
                result.summary,
                result.chunks_processed
            ),
            Err(failure) => format!("Could not analyze document: {failure}"),
        }
    }

    async fn fallback_reply(
        &self,
        message: &str,
        owner: Option<&OwnerId>,
        error: &InferenceError,
    ) -> String {
        tracing::warn!(error = %error, "Inference backend unavailable, using fallback responder");

        let cause = if error.is_timeout() {
            DegradedCause::Timeout
        } else {
            DegradedCause::Unreachable
        };

        let filenames: Vec<String> = self
            .visible_files(owner)
            .await
            .into_iter()
            .map(|r| r.filename)
            .collect();

        self.responder.respond(message, &filenames, cause)
    }

    /// The caller's own records plus every guest-scoped record.
    async fn visible_files(&self, owner: Option<&OwnerId>) -> Vec<UploadedFileRecord> {
        let mut files = Vec::new();

        if let Some(owner) = owner {
            match self.registry.list_by_owner(owner).await {
                Ok(records) => files.extend(records),
                Err(e) => tracing::warn!(error = %e, "File registry read failed"),
            }
        }

        match self.registry.list_guest_scoped().await {
            Ok(records) => {
                for record in records {
                    if !files.iter().any(|f| f.filename == record.filename) {
                        files.push(record);
                    }
                }
            }
            Err(e) => tracing::warn!(error = %e, "Guest registry read failed"),
        }

        files
    }
}
