//! `gameutils build` -- build a sprite archive from a descriptor file.
//!
//! # Examples
//!
//! ```text
//! gameutils build cat.json
//! gameutils build cat.json -o sprites/cat.sprite3
//! gameutils build cat.json -c ./gameutils.json --verbose
//! ```

use std::path::{Path, PathBuf};

use clap::Args;
use gameutils_core::{ArchiveBuilder, AssetRetriever};
use gameutils_platform::{NativePlatform, Platform};
use gameutils_types::SpriteDescriptor;
use tracing::info;

/// Arguments for the `gameutils build` subcommand.
#[derive(Args)]
pub struct BuildArgs {
    /// Sprite descriptor JSON file.
    pub descriptor: String,

    /// Output archive path (defaults to the descriptor path with a `.sprite3` extension).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Config file path (overrides auto-discovery).
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Run the build command.
pub async fn run(args: BuildArgs) -> anyhow::Result<()> {
    let config = super::load_config(args.config.as_deref()).await?;
    let platform = NativePlatform::new(&config.fetch)
        .map_err(|e| anyhow::anyhow!("failed to create HTTP client: {e}"))?;

    let descriptor_path = Path::new(&args.descriptor);
    let document = platform
        .fs()
        .read_to_string(descriptor_path)
        .await
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", descriptor_path.display()))?;
    let descriptor = SpriteDescriptor::parse(&document)?;

    let retriever = AssetRetriever::new(platform.http_arc(), &config.fetch);
    let builder = ArchiveBuilder::new(retriever, &config.archive);
    let archive = builder.assemble(&descriptor).await?;
    let entries = archive.len();
    let blob = archive.serialize()?;

    let output = output_path(descriptor_path, args.output.as_deref());
    platform.fs().write_bytes(&output, &blob.bytes).await?;

    info!(path = %output.display(), bytes = blob.len(), "sprite archive written");
    println!(
        "{}: {entries} entries ({} of {} assets) -> {}",
        descriptor.name,
        entries - 1,
        descriptor.asset_count(),
        output.display()
    );
    Ok(())
}

fn output_path(descriptor: &Path, explicit: Option<&str>) -> PathBuf {
    match explicit {
        Some(p) => PathBuf::from(p),
        None => descriptor.with_extension("sprite3"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_defaults_next_to_descriptor() {
        assert_eq!(
            output_path(Path::new("sprites/cat.json"), None),
            PathBuf::from("sprites/cat.sprite3")
        );
        assert_eq!(output_path(Path::new("cat"), None), PathBuf::from("cat.sprite3"));
    }

    #[test]
    fn explicit_output_wins() {
        assert_eq!(
            output_path(Path::new("cat.json"), Some("/tmp/out.sprite3")),
            PathBuf::from("/tmp/out.sprite3")
        );
    }
}
