use std::convert::Infallible;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::sse::{Event, Sse};
use axum::response::IntoResponse;
use axum::Json;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{ChatFrame, ChatTurn, OwnerId};
use crate::presentation::state::AppState;
use crate::application::services::ChatOutcome;

use super::owner_from_headers;

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_stream")]
    pub stream: bool,
}

fn default_stream() -> bool {
    true
}

#[derive(Serialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, headers, request), fields(stream = request.stream))]
pub async fn chat_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    if request.message.trim().is_empty() {
        tracing::warn!("Chat request with empty message");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No message provided".to_string(),
            }),
        )
            .into_response();
    }

    let owner: Option<OwnerId> = owner_from_headers(&headers);
    let turn = ChatTurn {
        message: request.message,
        stream_requested: request.stream,
    };

    match state.chat_service.handle(&turn, owner.as_ref()).await {
        ChatOutcome::Reply(reply) => (StatusCode::OK, Json(ChatReply { reply })).into_response(),
        ChatOutcome::Stream(frames) => {
            let events = frames.map(|frame| {
                let payload = match frame {
                    ChatFrame::Content(content) => json!({ "content": content }),
                    ChatFrame::Done { full_content } => {
                        json!({ "done": true, "full_content": full_content })
                    }
                    ChatFrame::Error(error) => json!({ "error": error }),
                };
                Ok::<_, Infallible>(Event::default().data(payload.to_string()))
            });

            Sse::new(events).into_response()
        }
    }
}
