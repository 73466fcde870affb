use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    InferenceBackend, InferenceError, InferenceFrame, InferenceFrameStream,
};

/// Client for the local inference service's chat endpoint
/// (`POST {base_url}/api/chat`). Buffered calls get one JSON object back;
/// streaming calls get newline-delimited JSON objects ending at the first
/// object marked done.
pub struct OllamaClient {
    http: Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<WireContent>,
}

#[derive(Deserialize)]
struct WireContent {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct StreamLine {
    #[serde(default)]
    message: Option<WireContent>,
    #[serde(default)]
    done: bool,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    async fn dispatch(
        &self,
        prompt: &str,
        stream: bool,
        timeout: Duration,
    ) -> Result<reqwest::Response, InferenceError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![WireMessage {
                role: "user",
                content: prompt,
            }],
            stream,
        };

        let response = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        // A non-200 never reaches the caller as a status; it is carried as an
        // error and handled like a connection failure upstream.
        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::warn!(status, "Inference backend returned non-success status");
            return Err(InferenceError::Status(status));
        }

        Ok(response)
    }
}

#[async_trait]
impl InferenceBackend for OllamaClient {
    #[tracing::instrument(skip(self, prompt))]
    async fn complete(
        &self,
        prompt: &str,
        timeout: Duration,
    ) -> Result<Option<String>, InferenceError> {
        let response = self.dispatch(prompt, false, timeout).await?;

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        Ok(parsed.message.and_then(|m| m.content))
    }

    #[tracing::instrument(skip(self, prompt))]
    async fn complete_stream(
        &self,
        prompt: &str,
        timeout: Duration,
    ) -> Result<InferenceFrameStream, InferenceError> {
        let response = self.dispatch(prompt, true, timeout).await?;
        let mut bytes = response.bytes_stream();

        let frames = async_stream::stream! {
            // Lines can span transport chunks, so decode through a buffer
            // instead of per-chunk splitting.
            let mut buffer = String::new();

            'read: while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        yield Err(map_transport_error(e));
                        break 'read;
                    }
                };

                buffer.push_str(&String::from_utf8_lossy(&chunk));

                while let Some(newline) = buffer.find('\n') {
                    let line = buffer[..newline].trim().to_string();
                    buffer.drain(..=newline);

                    if line.is_empty() {
                        continue;
                    }

                    match serde_json::from_str::<StreamLine>(&line) {
                        Ok(decoded) => {
                            let done = decoded.done;
                            yield Ok(InferenceFrame {
                                content: decoded.message.and_then(|m| m.content),
                                done,
                            });
                            if done {
                                break 'read;
                            }
                        }
                        Err(e) => {
                            yield Err(InferenceError::InvalidResponse(e.to_string()));
                            break 'read;
                        }
                    }
                }
            }
        };

        Ok(Box::pin(frames))
    }
}

fn map_transport_error(e: reqwest::Error) -> InferenceError {
    if e.is_timeout() {
        InferenceError::Timeout
    } else {
        InferenceError::Connection(e.to_string())
    }
}
