mod error;
mod http_mapping;
mod traits;
mod types;

pub use error::{Result, TableError};
pub use http_mapping::table_error_to_status_code;
pub use traits::{TableEntity, TableRepository};
pub use types::{validate_key_part, RowIdentity, RowKey, Version};
