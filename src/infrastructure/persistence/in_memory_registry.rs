use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{FileRegistry, RegistryError};
use crate::domain::{OwnerId, UploadedFileRecord};

/// Ephemeral registry keyed by owner then filename; records do not survive a
/// restart. Uploading the same filename twice replaces the record.
#[derive(Default)]
pub struct InMemoryFileRegistry {
    records: RwLock<HashMap<OwnerId, HashMap<String, UploadedFileRecord>>>,
}

impl InMemoryFileRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileRegistry for InMemoryFileRegistry {
    async fn put(&self, owner: &OwnerId, record: UploadedFileRecord) -> Result<(), RegistryError> {
        let mut records = self.records.write().await;
        records
            .entry(owner.clone())
            .or_default()
            .insert(record.filename.clone(), record);
        Ok(())
    }

    async fn list_by_owner(
        &self,
        owner: &OwnerId,
    ) -> Result<Vec<UploadedFileRecord>, RegistryError> {
        let records = self.records.read().await;
        Ok(records
            .get(owner)
            .map(|files| files.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn list_guest_scoped(&self) -> Result<Vec<UploadedFileRecord>, RegistryError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|(owner, _)| owner.is_guest())
            .flat_map(|(_, files)| files.values().cloned())
            .collect())
    }
}
