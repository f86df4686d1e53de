//! `gameutils config` -- display resolved configuration.

use gameutils_types::config::Config;

/// Print the resolved configuration as formatted JSON.
pub fn config_show(config: &Config) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
