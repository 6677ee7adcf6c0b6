use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::warn;

use crate::{EventBus, FlashcardEvent, StateError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("read of {key} failed: {message}")]
    Read { key: String, message: String },

    #[error("write of {key} failed: {message}")]
    Write { key: String, message: String },
}

/// Asynchronous string-keyed storage for JSON blobs.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Process-local store, used in tests and when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing entries
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read and decode the JSON value under `key`. `None` when the key was never written.
pub(crate) async fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StateError> {
    let raw = store.get(key).await.map_err(|source| StateError::Load {
        key: key.to_string(),
        source,
    })?;

    match raw {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StateError::Malformed {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Rewrite the full value under `key`. Failures are logged and published
/// before being returned; the caller's in-memory state is left as is.
pub(crate) async fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
    events: &EventBus,
) -> Result<(), StateError> {
    let encoded = serde_json::to_string(value).map_err(|source| StateError::Encode {
        key: key.to_string(),
        source,
    })?;

    if let Err(source) = store.set(key, &encoded).await {
        warn!("Failed to persist {}: {}", key, source);
        events.publish(FlashcardEvent::PersistenceFailed {
            key: key.to_string(),
            message: source.to_string(),
        });
        return Err(StateError::Save {
            key: key.to_string(),
            source,
        });
    }

    Ok(())
}
