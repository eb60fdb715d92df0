//! DynamoDB table implementation.
//!
//! Implements the `TableRepository` contract from `gremio_core::table`
//! against a single shared table. Optimistic concurrency rides on condition
//! expressions; the `version` attribute is compared on every update.

use std::collections::HashMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use gremio_core::table::{
    validate_key_part, Result, RowKey, TableEntity, TableError, TableRepository, Version,
};

use super::conversions::{
    entity_to_item, item_to_entity, ATTR_ENTITY_KIND, ATTR_PK, ATTR_ROW_KEY, ATTR_SK, ATTR_VERSION,
};
use super::error::{map_delete_item_error, map_get_item_error, map_put_item_error, map_scan_error};
use super::keys;
use crate::storage::identity::{resolve_create_keys, resolve_update_keys};

const DEFAULT_SCAN_PAGE_SIZE: i32 = 100;

/// DynamoDB-backed table for one entity kind.
pub struct DynamoTable<E> {
    client: Client,
    table_name: String,
    scan_page_size: i32,
    _kind: PhantomData<fn() -> E>,
}

impl<E> DynamoTable<E> {
    /// Creates a new table handle with the given client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            scan_page_size: DEFAULT_SCAN_PAGE_SIZE,
            _kind: PhantomData,
        }
    }

    /// Sets the page size used when scanning across partitions.
    pub fn with_scan_page_size(mut self, scan_page_size: i32) -> Self {
        self.scan_page_size = scan_page_size;
        self
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl<E: TableEntity> DynamoTable<E> {
    /// Runs a paginated scan filtered to this entity kind, with an optional
    /// extra filter on the row key attribute.
    async fn scan_kind(
        &self,
        row_key: Option<&RowKey>,
    ) -> Result<Vec<HashMap<String, AttributeValue>>> {
        let mut items = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let mut request = self
                .client
                .scan()
                .table_name(&self.table_name)
                .limit(self.scan_page_size)
                .expression_attribute_values(
                    ":kind",
                    AttributeValue::S(E::KIND.to_string()),
                );

            request = match row_key {
                Some(row_key) => request
                    .filter_expression(format!("{ATTR_ENTITY_KIND} = :kind AND {ATTR_ROW_KEY} = :rk"))
                    .expression_attribute_values(
                        ":rk",
                        AttributeValue::S(row_key.as_str().to_string()),
                    ),
                None => request.filter_expression(format!("{ATTR_ENTITY_KIND} = :kind")),
            };

            let result = request
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(map_scan_error)?;

            items.extend(result.items.unwrap_or_default());

            // A row-key lookup needs at most one match.
            if row_key.is_some() && !items.is_empty() {
                break;
            }

            start_key = result.last_evaluated_key;
            if start_key.is_none() {
                break;
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl<E> TableRepository<E> for DynamoTable<E>
where
    E: TableEntity + Serialize + DeserializeOwned,
{
    async fn create(&self, entity: &mut E) -> Result<()> {
        let (partition_key, row_key) = resolve_create_keys(entity)?;
        let version = Version::stamp();
        let item = entity_to_item(entity, &partition_key, &row_key, &version)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression(format!("attribute_not_exists({ATTR_SK})"))
            .send()
            .await
            .map_err(|err| {
                if matches!(
                    err.as_service_error(),
                    Some(PutItemError::ConditionalCheckFailedException(_))
                ) {
                    // Unreachable in practice: row keys are fresh 128-bit tokens.
                    TableError::Conflict {
                        kind: E::KIND,
                        row_key: row_key.to_string(),
                    }
                } else {
                    map_put_item_error(err)
                }
            })?;

        let identity = entity.identity_mut();
        identity.partition_key = Some(partition_key);
        identity.row_key = Some(row_key);
        identity.version = Some(version);
        Ok(())
    }

    async fn get(&self, row_key: &RowKey) -> Result<Option<E>> {
        // Only the row identifier is known here, so this falls back to a
        // filtered scan across partitions.
        let items = self.scan_kind(Some(row_key)).await?;
        match items.first() {
            Some(item) => Ok(Some(item_to_entity(item)?)),
            None => Ok(None),
        }
    }

    async fn get_in_partition(&self, partition_key: &str, row_key: &RowKey) -> Result<Option<E>> {
        validate_key_part("partition key", partition_key)?;

        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(
                ATTR_PK,
                AttributeValue::S(keys::table_pk(E::KIND, partition_key)),
            )
            .key(ATTR_SK, AttributeValue::S(keys::table_sk(row_key)))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_entity(&item)?)),
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> Result<Vec<E>> {
        let items = self.scan_kind(None).await?;
        items.iter().map(item_to_entity).collect()
    }

    async fn update(&self, entity: &mut E) -> Result<Version> {
        let (partition_key, row_key, expected_version) = resolve_update_keys(entity)?;
        let version = Version::stamp();
        let item = entity_to_item(entity, &partition_key, &row_key, &version)?;

        let put = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression(format!("attribute_exists({ATTR_SK}) AND #v = :expected"))
            .expression_attribute_names("#v", ATTR_VERSION)
            .expression_attribute_values(
                ":expected",
                AttributeValue::S(expected_version.as_str().to_string()),
            )
            .send()
            .await;

        match put {
            Ok(_) => {
                let identity = entity.identity_mut();
                identity.partition_key = Some(partition_key);
                identity.version = Some(version.clone());
                Ok(version)
            }
            Err(err) => {
                if matches!(
                    err.as_service_error(),
                    Some(PutItemError::ConditionalCheckFailedException(_))
                ) {
                    // Distinguish a missing row from a stale version with a
                    // follow-up point read.
                    match self.get_in_partition(&partition_key, &row_key).await? {
                        None => Err(TableError::NotFound {
                            kind: E::KIND,
                            row_key: row_key.to_string(),
                        }),
                        Some(_) => Err(TableError::Conflict {
                            kind: E::KIND,
                            row_key: row_key.to_string(),
                        }),
                    }
                } else {
                    Err(map_put_item_error(err))
                }
            }
        }
    }

    async fn delete(&self, partition_key: &str, row_key: &RowKey) -> Result<bool> {
        validate_key_part("partition key", partition_key)?;

        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(
                ATTR_PK,
                AttributeValue::S(keys::table_pk(E::KIND, partition_key)),
            )
            .key(ATTR_SK, AttributeValue::S(keys::table_sk(row_key)))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(result.attributes.is_some())
    }
}
