use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use futures::Stream;

/// One decoded object from the backend's line-delimited streaming protocol.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceFrame {
    pub content: Option<String>,
    pub done: bool,
}

pub type InferenceFrameStream =
    Pin<Box<dyn Stream<Item = Result<InferenceFrame, InferenceError>> + Send + 'static>>;

/// The external language-model chat service consumed for both document
/// analysis and free chat.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// One buffered call. `Ok(None)` means the backend answered but the
    /// response carried no message-content field.
    async fn complete(
        &self,
        prompt: &str,
        timeout: Duration,
    ) -> Result<Option<String>, InferenceError>;

    /// One streaming call. The returned stream ends at the first frame
    /// marked done.
    async fn complete_stream(
        &self,
        prompt: &str,
        timeout: Duration,
    ) -> Result<InferenceFrameStream, InferenceError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum InferenceError {
    #[error("backend request timed out")]
    Timeout,
    #[error("backend connection failed: {0}")]
    Connection(String),
    #[error("backend returned HTTP {0}")]
    Status(u16),
    #[error("invalid backend response: {0}")]
    InvalidResponse(String),
}

impl InferenceError {
    /// Non-200 statuses are treated like connection-level failures for
    /// control flow; only the timeout class selects a different fallback
    /// lead-in.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}
