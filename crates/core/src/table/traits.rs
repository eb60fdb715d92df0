use async_trait::async_trait;

use super::{Result, RowIdentity, RowKey, Version};

/// A strongly-typed record stored as a row of the partitioned table.
///
/// Implementors are flat domain records embedding a [`RowIdentity`]; binding
/// a type to the generic repository is the whole of an entity kind adapter.
pub trait TableEntity: Clone + Send + Sync + 'static {
    /// Kind name, used in errors and as the storage key prefix.
    const KIND: &'static str;

    /// Partition assigned when the caller supplies none at create time.
    const DEFAULT_PARTITION: &'static str;

    fn identity(&self) -> &RowIdentity;

    fn identity_mut(&mut self) -> &mut RowIdentity;
}

/// Generic repository over one entity kind, identical contract for every
/// backend.
///
/// Each operation is an independent short-lived unit of work; all state
/// lives in the underlying store and operations never retry internally.
/// Concurrent updates on one row are arbitrated by the version comparison:
/// exactly one writer succeeds per version generation.
#[async_trait]
pub trait TableRepository<E: TableEntity>: Send + Sync {
    /// Inserts a new row.
    ///
    /// Resolves the partition (caller-supplied or [`TableEntity::DEFAULT_PARTITION`]),
    /// assigns a fresh row key and stamps the version, populating both on the
    /// entity in place so the caller can report the new identity. A row
    /// already present at the assigned key — practically unreachable given
    /// random key assignment — is a `Conflict`.
    async fn create(&self, entity: &mut E) -> Result<()>;

    /// Looks up a row by row key alone, scanning across partitions.
    ///
    /// This is the fallback used when only the row identifier is known, as
    /// the get-by-id and update endpoints supply. Prefer
    /// [`get_in_partition`](Self::get_in_partition) when the partition is at
    /// hand.
    async fn get(&self, row_key: &RowKey) -> Result<Option<E>>;

    /// Point lookup by the full `(partition_key, row_key)` pair.
    async fn get_in_partition(&self, partition_key: &str, row_key: &RowKey) -> Result<Option<E>>;

    /// Returns every row of this kind across all partitions. Unordered.
    async fn get_all(&self) -> Result<Vec<E>>;

    /// Overwrites the domain fields of an existing row and re-stamps its
    /// version, returning the new token.
    ///
    /// The entity must carry its row key and last-seen version
    /// (`InvalidKey` otherwise); a missing partition key falls back to the
    /// kind's default. An absent row is `NotFound`; a stale version is
    /// `Conflict` — last-writer-wins is disallowed.
    async fn update(&self, entity: &mut E) -> Result<Version>;

    /// Removes the row if present.
    ///
    /// Idempotent: returns `Ok(false)` when no row exists at the key pair.
    async fn delete(&self, partition_key: &str, row_key: &RowKey) -> Result<bool>;
}
