//! Pure function for mapping table errors to HTTP status codes.
//!
//! The mapping preserves the client-visible behavior of the endpoint layer:
//! missing rows are 404, bad or stale keys are 400, and a store outage is 500.

use super::TableError;

/// Maps a [`TableError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `Conflict` -> 400 (Bad Request)
/// - `InvalidKey` -> 400 (Bad Request)
/// - `StoreUnavailable` -> 500 (Internal Server Error)
pub fn table_error_to_status_code(error: &TableError) -> u16 {
    match error {
        TableError::NotFound { .. } => 404,
        TableError::Conflict { .. } => 400,
        TableError::InvalidKey(_) => 400,
        TableError::StoreUnavailable(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = TableError::NotFound {
            kind: "Study",
            row_key: "row-123".to_string(),
        };
        assert_eq!(table_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_conflict_maps_to_400() {
        let error = TableError::Conflict {
            kind: "Study",
            row_key: "row-123".to_string(),
        };
        assert_eq!(table_error_to_status_code(&error), 400);
    }

    #[test]
    fn test_invalid_key_maps_to_400() {
        let error = TableError::InvalidKey("row key must not be empty".to_string());
        assert_eq!(table_error_to_status_code(&error), 400);
    }

    #[test]
    fn test_store_unavailable_maps_to_500() {
        let error = TableError::StoreUnavailable("dispatch failure".to_string());
        assert_eq!(table_error_to_status_code(&error), 500);
    }
}
