use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Configuration for the client facade.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Maximum number of cached resolve/get results. Oldest entries are
    /// evicted first once the bound is reached.
    pub cache_capacity: usize,
    /// Maximum retry attempts for transient network failures (in addition
    /// to the initial attempt).
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each subsequent attempt.
    pub retry_base_delay: Duration,
    /// Whether accepted writes are announced over the transport.
    pub announce_writes: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 1024,
            max_retries: 3,
            retry_base_delay: Duration::from_millis(50),
            announce_writes: true,
        }
    }
}

impl ClientConfig {
    /// Parse a configuration from TOML text. Missing fields fall back to
    /// their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ClientError> {
        toml::from_str(text).map_err(|e| ClientError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = ClientConfig::default();
        assert_eq!(config.cache_capacity, 1024);
        assert_eq!(config.max_retries, 3);
        assert!(config.announce_writes);
    }

    #[test]
    fn from_toml_with_overrides() {
        let config = ClientConfig::from_toml_str(
            r#"
            cache_capacity = 16
            max_retries = 1
            announce_writes = false
            "#,
        )
        .unwrap();
        assert_eq!(config.cache_capacity, 16);
        assert_eq!(config.max_retries, 1);
        assert!(!config.announce_writes);
        // Unspecified fields keep their defaults.
        assert_eq!(config.retry_base_delay, Duration::from_millis(50));
    }

    #[test]
    fn from_toml_empty_is_default() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config.cache_capacity, ClientConfig::default().cache_capacity);
    }

    #[test]
    fn from_toml_rejects_garbage() {
        assert!(ClientConfig::from_toml_str("cache_capacity = \"many\"").is_err());
    }
}
