//! The key-value store collaborator.
//!
//! The gateway never owns durability, replication or consistency. It talks to
//! whatever implements [`Store`] and is handed one at construction time.
//! [`MemoryStore`] is the in-process implementation used for local runs and
//! tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Out-of-band metadata written alongside a value.
///
/// Serializes as `{"contentType": "..."}`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub content_type: String,
}

/// A store backend failed to answer.
#[derive(Debug, Error)]
#[error("store unavailable: {0}")]
pub struct StoreError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl StoreError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }
}

/// Byte-blob storage keyed by string.
///
/// Object-safe: the router holds an `Arc<dyn Store>`.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// Returns the bytes stored at `key`, or `None` if nothing was written.
    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError>;

    /// Stores `value` at `key`, replacing any previous value and metadata.
    async fn put(&self, key: &str, value: Bytes, metadata: Metadata) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: Store + ?Sized> Store for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, value: Bytes, metadata: Metadata) -> Result<(), StoreError> {
        (**self).put(key, value, metadata).await
    }
}

#[async_trait]
impl<S: Store + ?Sized> Store for Box<S> {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, value: Bytes, metadata: Metadata) -> Result<(), StoreError> {
        (**self).put(key, value, metadata).await
    }
}

// ── MemoryStore ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct Entry {
    value: Bytes,
    metadata: Metadata,
}

/// In-process [`Store`]. Contents live as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata recorded by the last write to `key`.
    pub fn metadata(&self, key: &str) -> Result<Option<Metadata>, StoreError> {
        let entries = self.entries.read().map_err(|e| StoreError::new(e.to_string()))?;
        Ok(entries.get(key).map(|entry| entry.metadata.clone()))
    }

    /// Number of stored keys.
    pub fn len(&self) -> Result<usize, StoreError> {
        let entries = self.entries.read().map_err(|e| StoreError::new(e.to_string()))?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
        let entries = self.entries.read().map_err(|e| StoreError::new(e.to_string()))?;
        // Bytes clones are reference-counted, not copies.
        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn put(&self, key: &str, value: Bytes, metadata: Metadata) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|e| StoreError::new(e.to_string()))?;
        entries.insert(key.to_owned(), Entry { value, metadata });
        Ok(())
    }
}
