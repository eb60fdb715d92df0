use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the backing table (default: "gremio")
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub table_name: String,
    /// Page size for cross-partition scans (default: 100)
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub scan_page_size: i32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TABLE_NAME` - Name of the backing table (default: "gremio")
    /// - `SCAN_PAGE_SIZE` - Page size for cross-partition scans (default: 100)
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("TABLE_NAME").unwrap_or_else(|_| "gremio".to_string()),
            scan_page_size: env::var("SCAN_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config {
            table_name: "gremio".to_string(),
            scan_page_size: 100,
        };

        assert_eq!(config.table_name, "gremio");
        assert_eq!(config.scan_page_size, 100);
    }

    #[test]
    fn test_from_env_falls_back_to_defaults() {
        // These variables are not set in the test environment.
        let config = Config::from_env();

        assert!(!config.table_name.is_empty());
        assert!(config.scan_page_size > 0);
    }
}
