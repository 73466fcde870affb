use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::domain::{DocumentKind, OwnerId, UploadedFileRecord};
use crate::presentation::state::AppState;

use super::owner_from_headers;

const UNSUPPORTED_TYPE_ERROR: &str =
    "Only PDF and Excel files (.pdf, .xlsx, .xls) are supported";

#[derive(Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub size: u64,
    pub owner: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, headers, multipart))]
pub async fn upload_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let owner = owner_from_headers(&headers).unwrap_or_else(OwnerId::guest);

    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => {
            return error_response(StatusCode::BAD_REQUEST, "No file provided");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return error_response(StatusCode::BAD_REQUEST, "Failed to read multipart body");
        }
    };

    let filename = sanitize_filename(field.file_name().unwrap_or_default());
    if filename.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No file selected");
    }

    // Validation happens before anything touches the disk or the registry;
    // a rejected upload leaves no partial state behind.
    if DocumentKind::from_filename(&filename).is_none() {
        tracing::warn!(filename = %filename, "Rejected unsupported upload");
        return error_response(StatusCode::BAD_REQUEST, UNSUPPORTED_TYPE_ERROR);
    }

    let data = match field.bytes().await {
        Ok(data) => data,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read file bytes");
            return error_response(StatusCode::BAD_REQUEST, "Failed to read file");
        }
    };

    if data.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No file selected");
    }

    let owner_dir = state.settings.storage.upload_dir.join(owner.as_str());
    if let Err(e) = tokio::fs::create_dir_all(&owner_dir).await {
        tracing::error!(error = %e, "Failed to create upload directory");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Upload failed");
    }

    let path = owner_dir.join(&filename);
    if let Err(e) = tokio::fs::write(&path, &data).await {
        tracing::error!(error = %e, "Failed to write uploaded file");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Upload failed");
    }

    let size = data.len() as u64;
    let record = UploadedFileRecord::new(filename.clone(), path, size);

    if let Err(e) = state.registry.put(&owner, record).await {
        tracing::error!(error = %e, "Failed to record upload in registry");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Upload failed");
    }

    tracing::info!(owner = %owner, filename = %filename, size, "File uploaded");

    let message = if owner.is_guest() {
        "File uploaded successfully! You can analyze it in this session. For persistent \
         file storage, please log in."
    } else {
        "File uploaded successfully! Now you can ask me to 'analyze the document' or ask \
         questions about it."
    };

    (
        StatusCode::OK,
        Json(UploadResponse {
            filename,
            size,
            owner: owner.as_str().to_string(),
            message: message.to_string(),
        }),
    )
        .into_response()
}

fn error_response(status: StatusCode, message: &str) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Keep only the final path segment and drop characters that could escape
/// the owner's upload directory.
fn sanitize_filename(raw: &str) -> String {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let cleaned: String = name.chars().filter(|c| !matches!(c, '\0' | ':')).collect();
    let cleaned = cleaned.trim();

    if cleaned == "." || cleaned == ".." {
        return String::new();
    }

    cleaned.to_string()
}
