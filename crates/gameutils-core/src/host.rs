//! Host collaborator interfaces.
//!
//! The block-VM host owns sprites, costumes, audio playback and extension
//! loading. gameutils reaches all of it through these traits, injected at
//! construction time; nothing here assumes a process-wide host object.

use std::collections::HashMap;

use async_trait::async_trait;
use gameutils_types::{ArchiveBlob, FetchedAsset, Result};

/// Identifies a sprite the host created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteHandle {
    /// Host-assigned sprite id.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// Identifies a costume the host created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostumeHandle {
    /// Host-assigned costume id.
    pub id: String,
}

/// A host mutation that can be reverted later.
///
/// Returned by destructive host calls. A failed `undo` leaves the action
/// usable, so the caller can keep it and try again.
#[async_trait]
pub trait ReversibleAction: Send + Sync {
    /// Revert the mutation.
    async fn undo(&self) -> Result<()>;
}

/// Sprite and costume mutation API of the host runtime.
#[async_trait]
pub trait SpriteHost: Send + Sync {
    /// Ingest a sprite archive and create the sprite.
    async fn add_sprite(&self, archive: ArchiveBlob) -> Result<SpriteHandle>;

    /// Delete a sprite, returning the action that restores it.
    async fn delete_sprite(&self, sprite_id: &str) -> Result<Box<dyn ReversibleAction>>;

    /// Add a costume image to a sprite.
    async fn add_costume(&self, asset: FetchedAsset, sprite_id: &str) -> Result<CostumeHandle>;

    /// Remove a costume from a sprite.
    async fn delete_costume(&self, sprite_id: &str, costume_id: &str) -> Result<()>;
}

/// Single-channel audio playback owned by the host.
pub trait AudioPlayer: Send + Sync {
    /// Stop anything playing, rewind, and play `url` once (no loop).
    fn play(&self, url: &str) -> Result<()>;

    /// Stop playback, rewind, and clear the source.
    fn stop(&self);

    /// Whether the last played source reached its end.
    fn is_ended(&self) -> bool;
}

/// Loads further extensions by URL.
#[async_trait]
pub trait ExtensionLoader: Send + Sync {
    /// Load the extension script at `url`.
    async fn load_extension_url(&self, url: &str) -> Result<()>;
}

/// The target a block runs against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockTarget {
    /// Sprite id, or `None` when the target is the stage.
    pub sprite_id: Option<String>,
    /// Costumes of the target, name to id.
    pub costumes: HashMap<String, String>,
}

impl BlockTarget {
    /// The stage (not a sprite).
    pub fn stage() -> Self {
        Self::default()
    }

    /// A sprite target with no known costumes.
    pub fn sprite(id: impl Into<String>) -> Self {
        Self {
            sprite_id: Some(id.into()),
            costumes: HashMap::new(),
        }
    }

    /// Register a costume on this target.
    pub fn with_costume(mut self, name: impl Into<String>, id: impl Into<String>) -> Self {
        self.costumes.insert(name.into(), id.into());
        self
    }

    /// Whether the target is a sprite.
    pub fn is_sprite(&self) -> bool {
        self.sprite_id.is_some()
    }
}
