//! DynamoDB storage backend.
//!
//! Single-table layout: every entity kind shares one table, addressed by
//! `PK = "<KIND>#<partition_key>"` and `SK = <row_key>`, with the domain
//! fields carried as a schema-less JSON payload attribute.

mod conversions;
mod error;
mod keys;
mod repository;

pub use repository::DynamoTable;
