use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Result, TableError};

/// The storage layer separates key parts with `#`, so neither part may
/// contain it.
const KEY_SEPARATOR: char = '#';

/// Validates a caller-supplied partition or row key part.
///
/// `label` names the part in the error message ("partition key" / "row key").
pub fn validate_key_part(label: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(TableError::InvalidKey(format!(
            "{label} must not be empty"
        )));
    }
    if value.contains(KEY_SEPARATOR) {
        return Err(TableError::InvalidKey(format!(
            "{label} must not contain '{KEY_SEPARATOR}'"
        )));
    }
    Ok(())
}

/// Row identifier, unique within a partition.
///
/// Assigned exactly once, at create time, as a fresh 128-bit random token.
/// Uniqueness is probabilistic by construction — the store is never queried
/// to verify it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowKey(String);

impl RowKey {
    /// Generates a fresh, collision-free row key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parses a caller-supplied row key, rejecting empty or malformed values.
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        validate_key_part("row key", &value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque version token, changed on every successful write.
///
/// Stamped only by store implementations; callers compare tokens for
/// equality and never interpret them. A random token replaces the usual
/// wall-clock timestamp so stamping needs no shared state and two writes in
/// the same instant still get distinct tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    /// Produces a fresh version token for a successful write.
    pub fn stamp() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Version {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The identity and versioning fields every table entity carries.
///
/// All three fields are absent on a record that has not yet been created;
/// `create` populates the row key and version in place, and the partition
/// key falls back to the kind's default when the caller supplies none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowIdentity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_key: Option<RowKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_row_keys_are_distinct() {
        let a = RowKey::generate();
        let b = RowKey::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn test_parse_rejects_empty_row_key() {
        let result = RowKey::parse("");
        assert!(matches!(result, Err(TableError::InvalidKey(_))));
    }

    #[test]
    fn test_parse_rejects_separator_in_row_key() {
        let result = RowKey::parse("bad#key");
        assert!(matches!(result, Err(TableError::InvalidKey(_))));
    }

    #[test]
    fn test_parse_accepts_generated_key() {
        let key = RowKey::generate();
        let parsed = RowKey::parse(key.as_str()).unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn test_validate_key_part_labels_error() {
        let err = validate_key_part("partition key", "").unwrap_err();
        assert_eq!(err.to_string(), "invalid key: partition key must not be empty");
    }

    #[test]
    fn test_stamped_versions_are_distinct() {
        assert_ne!(Version::stamp(), Version::stamp());
    }

    #[test]
    fn test_row_key_serializes_transparently() {
        let key = RowKey::parse("row-1").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"row-1\"");
    }

    #[test]
    fn test_identity_skips_absent_fields() {
        let identity = RowIdentity::default();
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
