//! Sprite archive builder and block-VM extension adapter.
//!
//! # Architecture
//!
//! - [`AssetRetriever`] fetches one asset per URL through an injected
//!   [`HttpClient`](gameutils_platform::http::HttpClient)
//! - [`ArchiveBuilder`] parses a sprite descriptor, fetches every costume
//!   and sound concurrently, and packs what arrived into a [`SpriteArchive`]
//! - [`GameUtils`] is the extension the host registers; it declares the
//!   block palette and dispatches block invocations to the host
//!   collaborators in [`host`]
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use gameutils_core::{ArchiveBuilder, AssetRetriever};
//!
//! let retriever = AssetRetriever::new(platform.http_arc(), &config.fetch);
//! let builder = ArchiveBuilder::new(retriever, &config.archive);
//! let blob = builder
//!     .build_sprite_archive(r#"{"name": "cat", "costumes": ["https://x/cat.svg"]}"#)
//!     .await?;
//! std::fs::write("cat.sprite3", &blob.bytes)?;
//! ```

pub mod archive;
pub mod builder;
pub mod extension;
pub mod host;
pub mod restore;
pub mod retriever;

#[cfg(test)]
mod testing;

pub use archive::{ArchiveEntry, SpriteArchive};
pub use builder::ArchiveBuilder;
pub use extension::{GameUtils, HostServices, extension_info};
pub use host::{
    AudioPlayer, BlockTarget, CostumeHandle, ExtensionLoader, ReversibleAction, SpriteHandle,
    SpriteHost,
};
pub use restore::RestoreTable;
pub use retriever::{AssetRetriever, RetryConfig};
