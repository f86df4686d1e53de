//! # gameutils-types
//!
//! Core type definitions for the gameutils block-VM extension.
//!
//! This crate is the foundation of the dependency graph -- all other
//! gameutils crates depend on it. It contains:
//!
//! - **[`error`]** -- [`GameUtilsError`] and the crate-wide [`Result`] alias
//! - **[`sprite`]** -- Sprite descriptors, manifests, fetched assets, archive blobs
//! - **[`block`]** -- Block metadata declarations reported to the host
//! - **[`config`]** -- Configuration schema (fetch + archive settings)

pub mod block;
pub mod config;
pub mod error;
pub mod sprite;

pub use error::{GameUtilsError, Result};
pub use sprite::{
    ArchiveBlob, AssetKind, AssetSlot, FetchedAsset, SpriteDescriptor, MANIFEST_ENTRY_NAME,
    SPRITE_ARCHIVE_MIME_TYPE,
};
