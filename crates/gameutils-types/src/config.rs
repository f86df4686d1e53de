//! Configuration schema.
//!
//! Keys are snake_case. Config files written with camelCase keys are
//! normalized by the platform config loader before they reach serde.

use serde::{Deserialize, Serialize};

use crate::error::{GameUtilsError, Result};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Asset retrieval settings.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Archive serialization settings.
    #[serde(default)]
    pub archive: ArchiveConfig,
}

impl Config {
    /// Check semantic constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        self.archive.validate()?;
        self.fetch.validate()
    }
}

/// Asset retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Responses larger than this are treated as failed retrievals.
    #[serde(default = "default_max_asset_bytes")]
    pub max_asset_bytes: usize,

    /// Extra attempts after the first on transient failures. 0 = single attempt.
    #[serde(default)]
    pub max_retries: u32,

    /// Backoff base delay in milliseconds.
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    /// Backoff cap in milliseconds.
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

fn default_timeout_secs() -> u64 {
    60
}
fn default_max_asset_bytes() -> usize {
    10 * 1024 * 1024
}
fn default_retry_base_delay_ms() -> u64 {
    500
}
fn default_retry_max_delay_ms() -> u64 {
    5_000
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_asset_bytes: default_max_asset_bytes(),
            max_retries: 0,
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl FetchConfig {
    fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(GameUtilsError::ConfigInvalid {
                reason: "fetch.timeout_secs must be greater than 0".into(),
            });
        }
        if self.retry_base_delay_ms > self.retry_max_delay_ms {
            return Err(GameUtilsError::ConfigInvalid {
                reason: "fetch.retry_base_delay_ms exceeds fetch.retry_max_delay_ms".into(),
            });
        }
        Ok(())
    }
}

/// Archive serialization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// DEFLATE level, 1 (fastest) to 9 (smallest).
    #[serde(default = "default_compression_level")]
    pub compression_level: u32,
}

/// Compression level used when none is configured.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

fn default_compression_level() -> u32 {
    DEFAULT_COMPRESSION_LEVEL
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl ArchiveConfig {
    fn validate(&self) -> Result<()> {
        if !(1..=9).contains(&self.compression_level) {
            return Err(GameUtilsError::ConfigInvalid {
                reason: format!(
                    "archive.compression_level must be within 1..=9, got {}",
                    self.compression_level
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_object() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.fetch.timeout_secs, 60);
        assert_eq!(cfg.fetch.max_retries, 0);
        assert_eq!(cfg.fetch.max_asset_bytes, 10 * 1024 * 1024);
        assert_eq!(cfg.archive.compression_level, 6);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn snake_case_keys_deserialize() {
        let cfg: Config = serde_json::from_str(
            r#"{"fetch": {"max_retries": 2, "timeout_secs": 5}, "archive": {"compression_level": 9}}"#,
        )
        .unwrap();
        assert_eq!(cfg.fetch.max_retries, 2);
        assert_eq!(cfg.fetch.timeout_secs, 5);
        assert_eq!(cfg.archive.compression_level, 9);
    }

    #[test]
    fn compression_level_out_of_range() {
        let mut cfg = Config::default();
        cfg.archive.compression_level = 0;
        assert!(matches!(
            cfg.validate(),
            Err(GameUtilsError::ConfigInvalid { .. })
        ));
        cfg.archive.compression_level = 10;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut cfg = Config::default();
        cfg.fetch.timeout_secs = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn inverted_backoff_rejected() {
        let mut cfg = Config::default();
        cfg.fetch.retry_base_delay_ms = 10_000;
        assert!(cfg.validate().is_err());
    }
}
