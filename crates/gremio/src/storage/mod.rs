//! Storage backend implementations.
//!
//! Concrete implementations of the [`TableRepository`] trait from
//! `gremio_core::table`, selected at compile time via feature flags.
//!
//! - `inmemory` (default): HashMap-backed store, no external dependencies
//! - `dynamodb`: AWS DynamoDB single-table store using `aws-sdk-dynamodb`
//!
//! The features are mutually exclusive. The in-memory store is always
//! compiled for tests as the reference implementation of the contract.
//!
//! [`TableRepository`]: gremio_core::table::TableRepository

#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!(
    "Features 'inmemory' and 'dynamodb' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'dynamodb'. \
    Example: cargo build -p gremio --features inmemory"
);

pub mod identity;

#[cfg(any(feature = "inmemory", test))]
pub mod memory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(any(feature = "inmemory", test))]
pub use memory::MemoryTable;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoTable;
