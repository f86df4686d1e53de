//! Sprite archive builder.
//!
//! [`ArchiveBuilder`] turns a sprite descriptor document into a sprite
//! archive: parse, fetch every costume and sound concurrently, wait for all
//! of them to settle, then write the manifest plus every asset that arrived.
//!
//! ```rust,ignore
//! let builder = ArchiveBuilder::new(retriever, &config.archive);
//! let blob = builder
//!     .build_sprite_archive(r#"{"name": "cat", "costumes": ["https://x/cat.svg"]}"#)
//!     .await?;
//! host.add_sprite(blob).await?;
//! ```

use futures_util::future::{join, join_all};
use gameutils_types::config::ArchiveConfig;
use gameutils_types::{
    ArchiveBlob, AssetKind, AssetSlot, FetchedAsset, MANIFEST_ENTRY_NAME, Result, SpriteDescriptor,
};
use tracing::{debug, info};

use crate::archive::{SpriteArchive, asset_entry_name};
use crate::retriever::AssetRetriever;

/// Builds sprite archives from descriptor documents.
///
/// Holds no per-build state; concurrent builds on one builder are
/// independent.
#[derive(Clone)]
pub struct ArchiveBuilder {
    retriever: AssetRetriever,
    compression_level: u32,
}

impl ArchiveBuilder {
    pub fn new(retriever: AssetRetriever, archive: &ArchiveConfig) -> Self {
        Self {
            retriever,
            compression_level: archive.compression_level,
        }
    }

    /// Parse `document` and build its serialized archive.
    ///
    /// A malformed document fails before any request is made. Assets that
    /// cannot be fetched are left out; a manifest-only archive is a valid
    /// result.
    pub async fn build_sprite_archive(&self, document: &str) -> Result<ArchiveBlob> {
        let descriptor = SpriteDescriptor::parse(document)?;
        self.assemble(&descriptor).await?.serialize()
    }

    /// Fetch the descriptor's assets and populate an archive without
    /// serializing it.
    pub async fn assemble(&self, descriptor: &SpriteDescriptor) -> Result<SpriteArchive> {
        let mut archive = SpriteArchive::new(self.compression_level);
        archive.add_entry(MANIFEST_ENTRY_NAME, descriptor.manifest_json()?)?;

        let requested = descriptor.asset_count();
        let fetched = self.fetch_all(descriptor.asset_slots()).await;
        let included = fetched.len();

        for (slot, asset) in fetched {
            let name = asset_entry_name(&slot, &asset);
            debug!(entry = %name, url = %slot.url, bytes = asset.bytes.len(), "adding asset entry");
            archive.add_entry(name, asset.bytes)?;
        }

        info!(
            sprite = %descriptor.name,
            requested,
            included,
            skipped = requested - included,
            "sprite archive assembled"
        );
        Ok(archive)
    }

    /// Fan out one fetch per slot, costumes and sounds side by side, and
    /// wait for every one to settle. Results come back in slot order.
    async fn fetch_all(&self, slots: Vec<AssetSlot>) -> Vec<(AssetSlot, FetchedAsset)> {
        let (costumes, sounds): (Vec<_>, Vec<_>) = slots
            .into_iter()
            .partition(|slot| slot.kind == AssetKind::Costume);

        let fetch = |slot: AssetSlot| async move {
            let asset = self.retriever.fetch_asset(&slot.url).await;
            (slot, asset)
        };

        let (costumes, sounds) = join(
            join_all(costumes.into_iter().map(&fetch)),
            join_all(sounds.into_iter().map(&fetch)),
        )
        .await;

        costumes
            .into_iter()
            .chain(sounds)
            .filter_map(|(slot, asset)| asset.map(|a| (slot, a)))
            .collect()
    }
}
