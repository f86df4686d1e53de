//! CLI command implementations for `gameutils`.
//!
//! - [`build`] -- Sprite archive assembly from a descriptor file.
//! - [`blocks`] -- Block palette listing.
//! - [`config_cmd`] -- Resolved configuration display.

pub mod blocks;
pub mod build;
pub mod config_cmd;

use std::path::Path;

use gameutils_platform::config_loader;
use gameutils_platform::env::NativeEnvironment;
use gameutils_platform::fs::NativeFileSystem;
use gameutils_types::config::Config;

/// Load configuration from the given path override or via auto-discovery.
///
/// Discovery order:
/// 1. `GAMEUTILS_CONFIG` env var
/// 2. `~/.gameutils/config.json`
///
/// Returns a default `Config` if no config file is found.
pub async fn load_config(config_override: Option<&str>) -> anyhow::Result<Config> {
    let config = config_loader::load_config(
        &NativeFileSystem,
        &NativeEnvironment,
        config_override.map(Path::new),
    )
    .await
    .map_err(|e| anyhow::anyhow!("failed to load config: {e}"))?;
    Ok(config)
}
