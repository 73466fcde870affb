mod chat;
mod files;
mod health;
mod upload;

pub use chat::chat_handler;
pub use files::files_handler;
pub use health::health_handler;
pub use upload::upload_handler;

use axum::http::HeaderMap;

use crate::domain::OwnerId;

pub(crate) fn owner_from_headers(headers: &HeaderMap) -> Option<OwnerId> {
    headers
        .get("x-owner-id")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(OwnerId::new)
}
