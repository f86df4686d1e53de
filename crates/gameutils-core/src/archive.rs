//! Sprite archive assembly.
//!
//! A [`SpriteArchive`] collects named entries in insertion order and is
//! serialized exactly once into a ZIP container with every entry DEFLATE
//! compressed at a fixed level.

use std::io::{Cursor, Write};

use gameutils_types::config::DEFAULT_COMPRESSION_LEVEL;
use gameutils_types::{ArchiveBlob, AssetSlot, FetchedAsset, GameUtilsError, Result};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// One named entry of an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub data: Vec<u8>,
}

/// An archive being populated.
#[derive(Debug, Clone)]
pub struct SpriteArchive {
    entries: Vec<ArchiveEntry>,
    compression_level: u32,
}

impl Default for SpriteArchive {
    fn default() -> Self {
        Self::new(DEFAULT_COMPRESSION_LEVEL)
    }
}

impl SpriteArchive {
    /// Create an empty archive compressed at `compression_level` (1..=9).
    pub fn new(compression_level: u32) -> Self {
        Self {
            entries: Vec::new(),
            compression_level,
        }
    }

    /// Append an entry. Names must be unique within the archive.
    pub fn add_entry(&mut self, name: impl Into<String>, data: Vec<u8>) -> Result<()> {
        let name = name.into();
        if self.entries.iter().any(|e| e.name == name) {
            return Err(GameUtilsError::ArchiveSerialization(format!(
                "duplicate entry name: {name}"
            )));
        }
        self.entries.push(ArchiveEntry { name, data });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn compression_level(&self) -> u32 {
        self.compression_level
    }

    /// Serialize into a sprite archive blob, consuming the archive.
    pub fn serialize(self) -> Result<ArchiveBlob> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(self.compression_level)));

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for entry in &self.entries {
            writer
                .start_file(entry.name.as_str(), options)
                .map_err(|e| serialization_error(&entry.name, e))?;
            writer
                .write_all(&entry.data)
                .map_err(|e| serialization_error(&entry.name, e))?;
        }
        let cursor = writer
            .finish()
            .map_err(|e| GameUtilsError::ArchiveSerialization(e.to_string()))?;

        Ok(ArchiveBlob::sprite(cursor.into_inner()))
    }
}

fn serialization_error(entry: &str, err: impl std::fmt::Display) -> GameUtilsError {
    GameUtilsError::ArchiveSerialization(format!("{entry}: {err}"))
}

/// Entry name for a fetched asset: `<kind><index>.<ext>`.
pub fn asset_entry_name(slot: &AssetSlot, asset: &FetchedAsset) -> String {
    let ext = extension_from_url(&asset.source_url)
        .or_else(|| asset.mime_type_hint.as_deref().and_then(extension_from_mime))
        .unwrap_or_else(|| "bin".to_string());
    format!("{}.{ext}", slot.entry_stem())
}

fn extension_from_url(raw: &str) -> Option<String> {
    let parsed = url::Url::parse(raw).ok()?;
    let file = parsed.path_segments()?.next_back()?;
    let (stem, ext) = file.rsplit_once('.')?;
    let valid = !stem.is_empty()
        && (1..=5).contains(&ext.len())
        && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| ext.to_ascii_lowercase())
}

fn extension_from_mime(mime: &str) -> Option<String> {
    let essence = mime.split(';').next()?.trim().to_ascii_lowercase();
    let ext = match essence.as_str() {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/bmp" => "bmp",
        "image/svg+xml" => "svg",
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/wav" | "audio/wave" | "audio/x-wav" => "wav",
        "audio/ogg" => "ogg",
        _ => return None,
    };
    Some(ext.to_string())
}
