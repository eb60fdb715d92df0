//! In-memory table implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use gremio_core::table::{Result, RowKey, TableEntity, TableError, TableRepository, Version};

use crate::storage::identity::{resolve_create_keys, resolve_update_keys};

/// In-memory storage backend for one entity kind.
///
/// Rows live in a HashMap keyed by the `(partition_key, row_key)` pair,
/// wrapped in `Arc<RwLock<_>>` for thread-safe access. Data is not persisted
/// and is lost when the table is dropped. This is the reference
/// implementation of the repository contract.
#[derive(Debug, Clone)]
pub struct MemoryTable<E> {
    rows: Arc<RwLock<HashMap<(String, String), E>>>,
}

impl<E> Default for MemoryTable<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> MemoryTable<E> {
    /// Creates a new empty table.
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl<E: TableEntity> TableRepository<E> for MemoryTable<E> {
    async fn create(&self, entity: &mut E) -> Result<()> {
        let (partition_key, row_key) = resolve_create_keys(entity)?;

        let mut rows = self.rows.write().await;
        let slot = (partition_key.clone(), row_key.as_str().to_string());
        if rows.contains_key(&slot) {
            // Unreachable in practice: row keys are fresh 128-bit tokens.
            return Err(TableError::Conflict {
                kind: E::KIND,
                row_key: row_key.to_string(),
            });
        }

        let version = Version::stamp();
        let identity = entity.identity_mut();
        identity.partition_key = Some(partition_key);
        identity.row_key = Some(row_key);
        identity.version = Some(version);

        rows.insert(slot, entity.clone());
        Ok(())
    }

    async fn get(&self, row_key: &RowKey) -> Result<Option<E>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|((_, key), _)| key == row_key.as_str())
            .map(|(_, entity)| entity.clone()))
    }

    async fn get_in_partition(&self, partition_key: &str, row_key: &RowKey) -> Result<Option<E>> {
        let rows = self.rows.read().await;
        Ok(rows
            .get(&(partition_key.to_string(), row_key.as_str().to_string()))
            .cloned())
    }

    async fn get_all(&self) -> Result<Vec<E>> {
        let rows = self.rows.read().await;
        Ok(rows.values().cloned().collect())
    }

    async fn update(&self, entity: &mut E) -> Result<Version> {
        let (partition_key, row_key, expected_version) = resolve_update_keys(entity)?;

        let mut rows = self.rows.write().await;
        let slot = (partition_key.clone(), row_key.as_str().to_string());
        let current = rows.get(&slot).ok_or_else(|| TableError::NotFound {
            kind: E::KIND,
            row_key: row_key.to_string(),
        })?;

        let current_version = current
            .identity()
            .version
            .clone()
            .expect("stored rows always carry a version");
        if current_version != expected_version {
            return Err(TableError::Conflict {
                kind: E::KIND,
                row_key: row_key.to_string(),
            });
        }

        let version = Version::stamp();
        let identity = entity.identity_mut();
        identity.partition_key = Some(partition_key);
        identity.version = Some(version.clone());

        rows.insert(slot, entity.clone());
        Ok(version)
    }

    async fn delete(&self, partition_key: &str, row_key: &RowKey) -> Result<bool> {
        gremio_core::table::validate_key_part("partition key", partition_key)?;

        let mut rows = self.rows.write().await;
        let removed = rows.remove(&(partition_key.to_string(), row_key.as_str().to_string()));
        Ok(removed.is_some())
    }
}
