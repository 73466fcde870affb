use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{
    InferenceBackend, InferenceError, InferenceFrame, InferenceFrameStream,
};

/// Scripted inference backend for tests: buffered calls pop queued
/// responses, streaming calls pop a queued frame script. An empty queue
/// behaves like an unreachable backend.
#[derive(Default)]
pub struct MockInferenceBackend {
    responses: Mutex<VecDeque<Result<Option<String>, InferenceError>>>,
    frame_scripts: Mutex<VecDeque<Vec<Result<InferenceFrame, InferenceError>>>>,
    complete_calls: AtomicUsize,
    stream_calls: AtomicUsize,
}

impl MockInferenceBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, response: Result<Option<String>, InferenceError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn push_frames(&self, frames: Vec<Result<InferenceFrame, InferenceError>>) {
        self.frame_scripts.lock().unwrap().push_back(frames);
    }

    pub fn complete_calls(&self) -> usize {
        self.complete_calls.load(Ordering::SeqCst)
    }

    pub fn stream_calls(&self) -> usize {
        self.stream_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InferenceBackend for MockInferenceBackend {
    async fn complete(
        &self,
        _prompt: &str,
        _timeout: Duration,
    ) -> Result<Option<String>, InferenceError> {
        self.complete_calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(InferenceError::Connection("no scripted response".to_string())))
    }

    async fn complete_stream(
        &self,
        _prompt: &str,
        _timeout: Duration,
    ) -> Result<InferenceFrameStream, InferenceError> {
        self.stream_calls.fetch_add(1, Ordering::SeqCst);
        let frames = self
            .frame_scripts
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| InferenceError::Connection("no scripted stream".to_string()))?;
        Ok(Box::pin(futures::stream::iter(frames)))
    }
}
