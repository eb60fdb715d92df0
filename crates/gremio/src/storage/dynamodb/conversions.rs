//! DynamoDB attribute conversion.
//!
//! Pure functions for converting between DynamoDB items and table entities.
//! Testable in isolation without DynamoDB access.
//!
//! The domain fields travel as one JSON `payload` attribute — the repository
//! is generic over the record shape, so the row body is schema-less. The
//! identity fields are stored as their own attributes so condition
//! expressions and scan filters can address them.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde::de::DeserializeOwned;
use serde::Serialize;

use gremio_core::table::{Result, RowIdentity, RowKey, TableEntity, TableError, Version};

use super::keys;

pub const ATTR_PK: &str = "PK";
pub const ATTR_SK: &str = "SK";
pub const ATTR_ENTITY_KIND: &str = "entityKind";
pub const ATTR_PARTITION_KEY: &str = "partitionKey";
pub const ATTR_ROW_KEY: &str = "rowKey";
pub const ATTR_VERSION: &str = "version";
pub const ATTR_PAYLOAD: &str = "payload";

/// Convert an entity to a DynamoDB item under the given identity.
///
/// The identity attributes come from the arguments, not the entity, so the
/// caller controls exactly what gets written (fresh version, resolved
/// partition).
pub fn entity_to_item<E: TableEntity + Serialize>(
    entity: &E,
    partition_key: &str,
    row_key: &RowKey,
    version: &Version,
) -> Result<HashMap<String, AttributeValue>> {
    // Strip the identity so the payload holds domain fields only.
    let mut stripped = entity.clone();
    *stripped.identity_mut() = RowIdentity::default();
    let payload = serde_json::to_string(&stripped)
        .map_err(|e| TableError::StoreUnavailable(format!("payload serialization: {e}")))?;

    let mut item = HashMap::new();
    item.insert(
        ATTR_PK.to_string(),
        AttributeValue::S(keys::table_pk(E::KIND, partition_key)),
    );
    item.insert(
        ATTR_SK.to_string(),
        AttributeValue::S(keys::table_sk(row_key)),
    );
    item.insert(
        ATTR_ENTITY_KIND.to_string(),
        AttributeValue::S(E::KIND.to_string()),
    );
    item.insert(
        ATTR_PARTITION_KEY.to_string(),
        AttributeValue::S(partition_key.to_string()),
    );
    item.insert(
        ATTR_ROW_KEY.to_string(),
        AttributeValue::S(row_key.as_str().to_string()),
    );
    item.insert(
        ATTR_VERSION.to_string(),
        AttributeValue::S(version.as_str().to_string()),
    );
    item.insert(ATTR_PAYLOAD.to_string(), AttributeValue::S(payload));

    Ok(item)
}

/// Convert a DynamoDB item back to an entity, rehydrating its identity.
pub fn item_to_entity<E: TableEntity + DeserializeOwned>(
    item: &HashMap<String, AttributeValue>,
) -> Result<E> {
    let payload = get_string(item, ATTR_PAYLOAD)?;
    let mut entity: E = serde_json::from_str(&payload)
        .map_err(|e| TableError::StoreUnavailable(format!("payload deserialization: {e}")))?;

    let identity = entity.identity_mut();
    identity.partition_key = Some(get_string(item, ATTR_PARTITION_KEY)?);
    identity.row_key = Some(RowKey::parse(get_string(item, ATTR_ROW_KEY)?)?);
    identity.version = Some(Version::from(get_string(item, ATTR_VERSION)?));

    Ok(entity)
}

fn get_string(item: &HashMap<String, AttributeValue>, name: &str) -> Result<String> {
    item.get(name)
        .and_then(|value| value.as_s().ok())
        .cloned()
        .ok_or_else(|| {
            TableError::StoreUnavailable(format!("malformed item: missing attribute {name}"))
        })
}
