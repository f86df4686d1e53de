//! Error types for gameutils.
//!
//! Provides [`GameUtilsError`], the single error type returned by every
//! fallible operation. Individual asset fetch failures are deliberately
//! absent: a failed asset is an `Option::None`, not an error.

use thiserror::Error;

/// Top-level error type for gameutils.
///
/// Variants are grouped into input errors (rejected before any network
/// activity), operation errors, and host-side errors surfaced as-is.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GameUtilsError {
    // ── Input ────────────────────────────────────────────────────────

    /// The sprite descriptor document could not be parsed.
    #[error("malformed sprite descriptor: {reason}")]
    MalformedDescriptor {
        /// What is wrong with the document.
        reason: String,
    },

    /// Block arguments were missing or had the wrong type.
    #[error("invalid block arguments: {0}")]
    InvalidArgs(String),

    /// The host dispatched an opcode this extension does not declare.
    #[error("unknown opcode: {0}")]
    UnknownOpcode(String),

    /// Configuration is malformed or semantically invalid.
    #[error("invalid config: {reason}")]
    ConfigInvalid {
        /// What is wrong with the configuration.
        reason: String,
    },

    // ── Operation ────────────────────────────────────────────────────

    /// Writing the sprite archive container failed.
    #[error("archive serialization failed: {0}")]
    ArchiveSerialization(String),

    /// A whole-resource fetch (sprite archive, costume image) failed.
    #[error("fetch failed for {url}: {reason}")]
    Fetch {
        /// The requested URL.
        url: String,
        /// Status line or transport error.
        reason: String,
    },

    /// The block was run against a target that is not a sprite (e.g. the stage).
    #[error("target is not a sprite")]
    TargetNotSprite,

    /// A sprite, costume, or restore entry was not found.
    #[error("not found: {0}")]
    NotFound(String),

    // ── Host ─────────────────────────────────────────────────────────

    /// A host API call (ingestion, deletion, playback) failed.
    #[error("host error: {0}")]
    Host(String),

    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, GameUtilsError>;
