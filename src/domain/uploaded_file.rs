use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// Registry entry for a document a caller has uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFileRecord {
    pub filename: String,
    pub path: PathBuf,
    pub uploaded_at: DateTime<Utc>,
    pub size_bytes: u64,
}

impl UploadedFileRecord {
    pub fn new(filename: String, path: PathBuf, size_bytes: u64) -> Self {
        Self {
            filename,
            path,
            uploaded_at: Utc::now(),
            size_bytes,
        }
    }
}
