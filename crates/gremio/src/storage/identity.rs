//! Key resolution shared by the storage backends.
//!
//! Create assigns a fresh row key within the declared (or default)
//! partition; update requires the full identity plus the last-seen version.

use gremio_core::table::{validate_key_part, Result, RowKey, TableEntity, TableError, Version};

/// Resolves the identity for a create: validates or defaults the partition
/// key and assigns a fresh row key. Never consults the store.
pub fn resolve_create_keys<E: TableEntity>(entity: &E) -> Result<(String, RowKey)> {
    let partition_key = match &entity.identity().partition_key {
        Some(partition_key) => {
            validate_key_part("partition key", partition_key)?;
            partition_key.clone()
        }
        None => E::DEFAULT_PARTITION.to_string(),
    };
    Ok((partition_key, RowKey::generate()))
}

/// Resolves the identity for an update: the row key and last-seen version
/// must be present; a missing partition key falls back to the kind's
/// default.
pub fn resolve_update_keys<E: TableEntity>(entity: &E) -> Result<(String, RowKey, Version)> {
    let identity = entity.identity();

    let row_key = identity
        .row_key
        .clone()
        .ok_or_else(|| TableError::InvalidKey("row key is required for update".to_string()))?;
    let version = identity.version.clone().ok_or_else(|| {
        TableError::InvalidKey("last-seen version is required for update".to_string())
    })?;
    let partition_key = match &identity.partition_key {
        Some(partition_key) => {
            validate_key_part("partition key", partition_key)?;
            partition_key.clone()
        }
        None => E::DEFAULT_PARTITION.to_string(),
    };

    Ok((partition_key, row_key, version))
}
