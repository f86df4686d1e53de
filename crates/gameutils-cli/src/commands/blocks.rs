//! `gameutils blocks` -- print the extension's block palette.

/// Print the extension metadata the host would receive, as JSON.
pub fn run() -> anyhow::Result<()> {
    let info = gameutils_core::extension_info();
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}
