use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::presentation::state::AppState;

use super::owner_from_headers;

#[derive(Serialize)]
pub struct FilesResponse {
    pub files: Vec<FileEntry>,
}

#[derive(Serialize)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    pub uploaded_at: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, headers))]
pub async fn files_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let Some(owner) = owner_from_headers(&headers) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Missing x-owner-id header".to_string(),
            }),
        )
            .into_response();
    };

    match state.registry.list_by_owner(&owner).await {
        Ok(records) => {
            let files = records
                .into_iter()
                .map(|r| FileEntry {
                    name: r.filename,
                    size: r.size_bytes,
                    uploaded_at: r.uploaded_at.to_rfc3339(),
                })
                .collect();
            (StatusCode::OK, Json(FilesResponse { files })).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "File registry read failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Could not list files".to_string(),
                }),
            )
                .into_response()
        }
    }
}
