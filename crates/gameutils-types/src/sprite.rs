//! Sprite descriptor and archive data model.
//!
//! A [`SpriteDescriptor`] is the user-supplied JSON document describing a
//! sprite to create. Its manifest form (asset URL lists cleared) becomes the
//! `sprite.json` entry of the archive, and each [`FetchedAsset`] becomes one
//! more entry alongside it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{GameUtilsError, Result};

/// Archive entry name of the manifest document.
pub const MANIFEST_ENTRY_NAME: &str = "sprite.json";

/// MIME type the host ingestion API expects on a sprite archive.
pub const SPRITE_ARCHIVE_MIME_TYPE: &str = "application/x.scratch.sprite3";

/// A sprite to create, parsed from a JSON document.
///
/// Fields other than `name`, `costumes` and `sounds` are carried through to
/// the manifest untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteDescriptor {
    /// Sprite name.
    pub name: String,

    /// Costume image URLs, in declaration order.
    #[serde(default)]
    pub costumes: Vec<String>,

    /// Sound URLs, in declaration order.
    #[serde(default)]
    pub sounds: Vec<String>,

    /// Any other top-level fields of the document.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SpriteDescriptor {
    /// Parse a descriptor document.
    ///
    /// Fails with [`GameUtilsError::MalformedDescriptor`] unless the document
    /// is a JSON object with a string `name` and, when present, string arrays
    /// for `costumes` and `sounds`.
    pub fn parse(document: &str) -> Result<Self> {
        serde_json::from_str(document).map_err(|e| GameUtilsError::MalformedDescriptor {
            reason: e.to_string(),
        })
    }

    /// The manifest form of this descriptor: same document, asset lists cleared.
    pub fn manifest(&self) -> SpriteDescriptor {
        SpriteDescriptor {
            name: self.name.clone(),
            costumes: Vec::new(),
            sounds: Vec::new(),
            extra: self.extra.clone(),
        }
    }

    /// Serialize the manifest as pretty-printed JSON bytes.
    pub fn manifest_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.manifest())?)
    }

    /// Total number of assets referenced by the descriptor.
    pub fn asset_count(&self) -> usize {
        self.costumes.len() + self.sounds.len()
    }

    /// One slot per referenced asset: costumes first, then sounds.
    ///
    /// Slot indices are positions within each list, so entry names derived
    /// from a slot do not depend on the order fetches complete in.
    pub fn asset_slots(&self) -> Vec<AssetSlot> {
        let costumes = self
            .costumes
            .iter()
            .enumerate()
            .map(|(index, url)| AssetSlot::new(AssetKind::Costume, index, url));
        let sounds = self
            .sounds
            .iter()
            .enumerate()
            .map(|(index, url)| AssetSlot::new(AssetKind::Sound, index, url));
        costumes.chain(sounds).collect()
    }
}

/// Which list of the descriptor an asset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// An image from `costumes`.
    Costume,
    /// An audio file from `sounds`.
    Sound,
}

impl AssetKind {
    /// Lowercase label used as the archive entry prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Costume => "costume",
            Self::Sound => "sound",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested asset, identified before any fetch starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSlot {
    /// Source list.
    pub kind: AssetKind,
    /// Position within the source list.
    pub index: usize,
    /// Requested URL.
    pub url: String,
}

impl AssetSlot {
    /// Create a slot.
    pub fn new(kind: AssetKind, index: usize, url: impl Into<String>) -> Self {
        Self {
            kind,
            index,
            url: url.into(),
        }
    }

    /// Entry name without extension, e.g. `costume0`.
    pub fn entry_stem(&self) -> String {
        format!("{}{}", self.kind, self.index)
    }
}

/// The payload of one successful retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedAsset {
    /// URL the bytes were retrieved from.
    pub source_url: String,
    /// Raw response body.
    pub bytes: Vec<u8>,
    /// `content-type` reported by the server, if any.
    pub mime_type_hint: Option<String>,
}

/// A serialized sprite archive, ready for the host ingestion API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveBlob {
    /// Serialized ZIP container.
    pub bytes: Vec<u8>,
    /// Container MIME type.
    pub mime_type: String,
}

impl ArchiveBlob {
    /// Wrap serialized sprite archive bytes.
    pub fn sprite(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            mime_type: SPRITE_ARCHIVE_MIME_TYPE.to_string(),
        }
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the blob is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
