use async_trait::async_trait;
use flashcard_core::{KeyValueStore, StoreError};
use sea_orm::DatabaseConnection;

use crate::repositories::KvRepository;

/// [`KeyValueStore`] backed by the `kv_entries` table.
#[derive(Clone)]
pub struct SqliteStore {
    repository: KvRepository,
}

impl SqliteStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            repository: KvRepository::new(db),
        }
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.repository
            .find(key)
            .await
            .map_err(|e| StoreError::Read {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.repository
            .upsert(key, value)
            .await
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                message: e.to_string(),
            })
    }
}
