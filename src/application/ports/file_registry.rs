use async_trait::async_trait;

use crate::domain::{OwnerId, UploadedFileRecord};

/// Per-owner registry of uploaded files. Writes on upload and reads on
/// analysis are not synchronized against each other: concurrent upload and
/// analyze for the same owner is last-writer-visible, not transactional.
#[async_trait]
pub trait FileRegistry: Send + Sync {
    /// Insert or replace the record stored under `(owner, record.filename)`.
    async fn put(&self, owner: &OwnerId, record: UploadedFileRecord) -> Result<(), RegistryError>;

    async fn list_by_owner(&self, owner: &OwnerId)
        -> Result<Vec<UploadedFileRecord>, RegistryError>;

    /// Records owned by any guest-scoped caller.
    async fn list_guest_scoped(&self) -> Result<Vec<UploadedFileRecord>, RegistryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("registry query failed: {0}")]
    QueryFailed(String),
    #[error("registry connection failed: {0}")]
    ConnectionFailed(String),
}
