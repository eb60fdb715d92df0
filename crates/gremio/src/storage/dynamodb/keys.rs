//! DynamoDB key generation.
//!
//! Pure functions for building the composite primary key. All functions are
//! sync and have no side effects.

use gremio_core::table::RowKey;

/// Generate the partition key attribute for a row.
///
/// Pattern: `<KIND>#<partition_key>`. Prefixing with the entity kind keeps
/// kinds with identical partition names apart in the shared table.
pub fn table_pk(kind: &str, partition_key: &str) -> String {
    format!("{kind}#{partition_key}")
}

/// Generate the sort key attribute for a row.
///
/// Pattern: `<row_key>` (the row key alone; it is already unique within its
/// partition).
pub fn table_sk(row_key: &RowKey) -> String {
    row_key.as_str().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_pk() {
        assert_eq!(table_pk("Study", "study"), "Study#study");
    }

    #[test]
    fn test_table_pk_keeps_kinds_apart() {
        assert_ne!(table_pk("Study", "records"), table_pk("Institution", "records"));
    }

    #[test]
    fn test_table_sk() {
        let row_key = RowKey::parse("row-1").unwrap();
        assert_eq!(table_sk(&row_key), "row-1");
    }
}
