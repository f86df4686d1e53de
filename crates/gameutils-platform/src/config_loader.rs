//! Configuration file discovery and loading.
//!
//! The discovery order is:
//! 1. `GAMEUTILS_CONFIG` environment variable (absolute path).
//! 2. `~/.gameutils/config.json`
//! 3. If none found, defaults.
//!
//! JSON keys are normalized from camelCase to snake_case before
//! deserializing, so configs shared with the JavaScript host load as-is.

use std::path::{Path, PathBuf};

use gameutils_types::config::Config;
use gameutils_types::{GameUtilsError, Result};
use serde_json::Value;

/// Environment variable that overrides config discovery.
pub const CONFIG_ENV_VAR: &str = "GAMEUTILS_CONFIG";

/// Discover the config file path.
///
/// Returns `None` if no config file exists at any candidate location. The
/// env var path is returned as-is; the loader reports it if missing.
pub fn discover_config_path(
    env: &dyn super::env::Environment,
    home_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(env_path) = env.get_var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(env_path));
    }

    let path = home_dir?.join(".gameutils").join("config.json");
    path.exists().then_some(path)
}

/// Load raw JSON configuration from `path`, or via discovery when `None`.
///
/// An explicit path must exist. A discovered path that does not exist
/// falls back to an empty object (all defaults).
pub async fn load_config_raw(
    fs: &dyn super::fs::FileSystem,
    env: &dyn super::env::Environment,
    path: Option<&Path>,
) -> Result<Value> {
    let path = match path {
        Some(p) => {
            if !fs.exists(p).await {
                return Err(GameUtilsError::ConfigInvalid {
                    reason: format!("config file not found: {}", p.display()),
                });
            }
            p.to_path_buf()
        }
        None => {
            let Some(found) = discover_config_path(env, fs.home_dir()) else {
                tracing::debug!("no config file found, using defaults");
                return Ok(Value::Object(serde_json::Map::new()));
            };
            if !fs.exists(&found).await {
                tracing::warn!(
                    path = %found.display(),
                    "config path does not exist, using defaults"
                );
                return Ok(Value::Object(serde_json::Map::new()));
            }
            found
        }
    };

    tracing::debug!(path = %path.display(), "loading config file");
    let contents = fs.read_to_string(&path).await?;
    let value: Value =
        serde_json::from_str(&contents).map_err(|e| GameUtilsError::ConfigInvalid {
            reason: format!("failed to parse config file {}: {e}", path.display()),
        })?;

    Ok(normalize_keys(value))
}

/// Load, deserialize and validate the configuration.
pub async fn load_config(
    fs: &dyn super::fs::FileSystem,
    env: &dyn super::env::Environment,
    path: Option<&Path>,
) -> Result<Config> {
    let raw = load_config_raw(fs, env, path).await?;
    let config: Config =
        serde_json::from_value(raw).map_err(|e| GameUtilsError::ConfigInvalid {
            reason: e.to_string(),
        })?;
    config.validate()?;
    Ok(config)
}

/// Convert camelCase JSON keys to snake_case recursively.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, val)| (camel_to_snake(&key), normalize_keys(val)))
                .collect(),
        ),
        Value::Array(arr) => Value::Array(arr.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

/// Convert a single camelCase string to snake_case.
///
/// A run of uppercase letters is kept together, with an underscore inserted
/// only before the last one when a lowercase letter follows it.
///
/// # Examples
/// ```
/// # use gameutils_platform::config_loader::camel_to_snake;
/// assert_eq!(camel_to_snake("maxRetries"), "max_retries");
/// assert_eq!(camel_to_snake("already_snake"), "already_snake");
/// assert_eq!(camel_to_snake("blockIconURI"), "block_icon_uri");
/// assert_eq!(camel_to_snake("HTTPTimeout"), "http_timeout");
/// ```
pub fn camel_to_snake(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            if prev.is_lowercase()
                || (prev.is_uppercase() && next.is_some_and(|c| c.is_lowercase()))
            {
                result.push('_');
            }
        }
        result.push(ch.to_ascii_lowercase());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    struct MockEnv {
        vars: HashMap<String, String>,
    }

    impl MockEnv {
        fn new() -> Self {
            Self {
                vars: HashMap::new(),
            }
        }

        fn with_var(mut self, key: &str, value: &str) -> Self {
            self.vars.insert(key.to_string(), value.to_string());
            self
        }
    }

    impl crate::env::Environment for MockEnv {
        fn get_var(&self, name: &str) -> Option<String> {
            self.vars.get(name).cloned()
        }
    }

    #[test]
    fn test_camel_to_snake() {
        assert_eq!(camel_to_snake("compressionLevel"), "compression_level");
        assert_eq!(camel_to_snake("retryBaseDelayMs"), "retry_base_delay_ms");
        assert_eq!(camel_to_snake("fetch"), "fetch");
        assert_eq!(camel_to_snake("Config"), "config");
        assert_eq!(camel_to_snake("HTML"), "html");
        assert_eq!(camel_to_snake(""), "");
    }

    #[test]
    fn test_normalize_keys_nested() {
        let input = json!({
            "fetch": {"maxRetries": 2, "timeoutSecs": 5},
            "archive": {"compressionLevel": 9}
        });
        let expected = json!({
            "fetch": {"max_retries": 2, "timeout_secs": 5},
            "archive": {"compression_level": 9}
        });
        assert_eq!(normalize_keys(input), expected);
    }

    #[test]
    fn test_normalize_keys_primitives_unchanged() {
        assert_eq!(normalize_keys(json!(42)), json!(42));
        assert_eq!(normalize_keys(json!([{"aB": 1}])), json!([{"a_b": 1}]));
    }

    #[test]
    fn test_discover_env_var_takes_precedence() {
        let env = MockEnv::new().with_var(CONFIG_ENV_VAR, "/custom/config.json");
        let result = discover_config_path(&env, Some(PathBuf::from("/home/user")));
        assert_eq!(result, Some(PathBuf::from("/custom/config.json")));
    }

    #[test]
    fn test_discover_no_home_no_env() {
        assert_eq!(discover_config_path(&MockEnv::new(), None), None);
    }

    #[test]
    fn test_discover_home_without_file() {
        let home = tempfile::tempdir().unwrap();
        let result = discover_config_path(&MockEnv::new(), Some(home.path().to_path_buf()));
        assert_eq!(result, None);
    }

    #[cfg(feature = "native")]
    mod native {
        use super::*;
        use crate::fs::NativeFileSystem;

        #[tokio::test]
        async fn test_load_explicit_path() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.json");
            std::fs::write(
                &path,
                r#"{"archive": {"compressionLevel": 3}, "fetch": {"maxRetries": 2, "retryBaseDelayMs": 100}}"#,
            )
            .unwrap();

            let cfg = load_config(&NativeFileSystem, &MockEnv::new(), Some(&path))
                .await
                .unwrap();
            assert_eq!(cfg.archive.compression_level, 3);
            assert_eq!(cfg.fetch.max_retries, 2);
            assert_eq!(cfg.fetch.retry_base_delay_ms, 100);
            assert_eq!(cfg.fetch.timeout_secs, 60);
        }

        #[tokio::test]
        async fn test_load_explicit_missing_path_fails() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("missing.json");
            let err = load_config(&NativeFileSystem, &MockEnv::new(), Some(&path))
                .await
                .unwrap_err();
            assert!(matches!(err, GameUtilsError::ConfigInvalid { .. }));
        }

        #[tokio::test]
        async fn test_load_env_var_missing_file_uses_defaults() {
            let env = MockEnv::new().with_var(CONFIG_ENV_VAR, "/tmp/.gameutils-test-nonexistent.json");
            let cfg = load_config(&NativeFileSystem, &env, None).await.unwrap();
            assert_eq!(cfg.archive.compression_level, 6);
        }

        #[tokio::test]
        async fn test_load_invalid_level_rejected() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.json");
            std::fs::write(&path, r#"{"archive": {"compression_level": 12}}"#).unwrap();

            let err = load_config(&NativeFileSystem, &MockEnv::new(), Some(&path))
                .await
                .unwrap_err();
            assert!(err.to_string().contains("compression_level"));
        }

        #[tokio::test]
        async fn test_load_malformed_json_rejected() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.json");
            std::fs::write(&path, "{not json").unwrap();

            let err = load_config(&NativeFileSystem, &MockEnv::new(), Some(&path))
                .await
                .unwrap_err();
            assert!(matches!(err, GameUtilsError::ConfigInvalid { .. }));
        }
    }
}
