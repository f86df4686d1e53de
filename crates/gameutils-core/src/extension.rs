//! The GameUtils extension adapter.
//!
//! [`GameUtils`] is what the host registers: it reports its blocks through
//! [`GameUtils::info`] and receives block invocations through
//! [`GameUtils::dispatch`]. Each block maps to one typed async method that
//! returns a [`Result`]; `dispatch` is the boundary that turns every error
//! into a log line and a neutral return value so a failing block never
//! takes the host down.
//!
//! The adapter also keeps the bookkeeping the blocks need between calls:
//! ids of sprites and costumes it created, and a [`RestoreTable`] of
//! deleted sprites.

use std::sync::Arc;

use gameutils_platform::http::HttpClient;
use gameutils_types::block::{BlockInfo, ExtensionInfo};
use gameutils_types::config::Config;
use gameutils_types::{ArchiveBlob, GameUtilsError, Result};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::builder::ArchiveBuilder;
use crate::host::{
    AudioPlayer, BlockTarget, CostumeHandle, ExtensionLoader, SpriteHandle, SpriteHost,
};
use crate::restore::RestoreTable;
use crate::retriever::AssetRetriever;

/// Extension id reported to the host.
pub const EXTENSION_ID: &str = "gameutils";

const DEFAULT_COSTUME_URI: &str = "https://en.scratch-wiki.info/w/images/ScratchCat3.0.svg";
const DEFAULT_AUDIO_URL: &str = "https://scratch.mit.edu/sounds/music/8bit.mp3";
const DEFAULT_SPRITE_JSON: &str = r#"{"name": "sprite1", "costumes": [], "sounds": []}"#;

/// Host collaborators injected into the adapter.
#[derive(Clone)]
pub struct HostServices {
    /// Sprite and costume mutation API.
    pub sprites: Arc<dyn SpriteHost>,
    /// Audio playback.
    pub audio: Arc<dyn AudioPlayer>,
    /// Extension loading.
    pub extensions: Arc<dyn ExtensionLoader>,
}

#[derive(Default)]
struct Bookkeeping {
    sprites: Vec<String>,
    costumes: Vec<String>,
    deleted_sprites: RestoreTable,
}

/// The host-facing extension.
pub struct GameUtils {
    host: HostServices,
    retriever: AssetRetriever,
    builder: ArchiveBuilder,
    state: Mutex<Bookkeeping>,
}

impl GameUtils {
    /// Create the extension over `http` with the given configuration.
    ///
    /// Fails with [`GameUtilsError::ConfigInvalid`] if `config` does not
    /// validate.
    pub fn new(host: HostServices, http: Arc<dyn HttpClient>, config: &Config) -> Result<Self> {
        config.validate()?;
        let retriever = AssetRetriever::new(http, &config.fetch);
        let builder = ArchiveBuilder::new(retriever.clone(), &config.archive);
        Ok(Self {
            host,
            retriever,
            builder,
            state: Mutex::new(Bookkeeping::default()),
        })
    }

    /// Block metadata for the host's extension manager.
    pub fn info(&self) -> ExtensionInfo {
        extension_info()
    }

    /// Run the block `opcode` with `args` against `target`.
    ///
    /// Never fails: errors are logged and a neutral value is returned
    /// (`false` for reporters, `null` for commands).
    pub async fn dispatch(&self, opcode: &str, args: &Value, target: &BlockTarget) -> Value {
        debug!(opcode, "dispatching block");
        match self.try_dispatch(opcode, args, target).await {
            Ok(value) => value,
            Err(e) => {
                error!(opcode, error = %e, "block failed");
                if opcode == "sounds_done" {
                    Value::Bool(false)
                } else {
                    Value::Null
                }
            }
        }
    }

    async fn try_dispatch(&self, opcode: &str, args: &Value, target: &BlockTarget) -> Result<Value> {
        match opcode {
            "create_sprite" => {
                self.create_sprite(&string_arg(args, "url")?).await?;
            }
            "create_sprite_from_json" => {
                self.create_sprite_from_json(&string_arg(args, "json")?).await?;
            }
            "delete_sprite" => self.delete_sprite(&string_arg(args, "sprite")?).await?,
            "restore_sprite" => self.restore_sprite(&string_arg(args, "sprite")?).await?,
            "create_costume" => {
                self.create_costume(&string_arg(args, "uri")?, target).await?;
            }
            "delete_costume" => {
                self.delete_costume(&string_arg(args, "costume")?, target)
                    .await?
            }
            "playAudioFromURL" => self.play_audio_from_url(&string_arg(args, "URL")?)?,
            "stopAudio" => self.stop_audio(),
            "sounds_done" => return Ok(Value::Bool(self.sounds_done())),
            "DynloadExtension" => self.dynload_extension(&string_arg(args, "uri")?).await?,
            other => return Err(GameUtilsError::UnknownOpcode(other.to_string())),
        }
        Ok(Value::Null)
    }

    /// Fetch a ready-made sprite archive from `url` and hand it to the host.
    pub async fn create_sprite(&self, url: &str) -> Result<SpriteHandle> {
        let archive = self.retriever.fetch_resource(url).await?;
        self.ingest(ArchiveBlob::sprite(archive.bytes)).await
    }

    /// Build a sprite archive from a descriptor document and hand it to the host.
    pub async fn create_sprite_from_json(&self, document: &str) -> Result<SpriteHandle> {
        let blob = self.builder.build_sprite_archive(document).await?;
        self.ingest(blob).await
    }

    async fn ingest(&self, blob: ArchiveBlob) -> Result<SpriteHandle> {
        let bytes = blob.len();
        let handle = self.host.sprites.add_sprite(blob).await?;
        info!(sprite = %handle.id, name = %handle.name, bytes, "sprite created");
        self.state.lock().await.sprites.push(handle.id.clone());
        Ok(handle)
    }

    /// Delete a sprite and remember how to restore it.
    pub async fn delete_sprite(&self, sprite_id: &str) -> Result<()> {
        let restore = self.host.sprites.delete_sprite(sprite_id).await?;
        let mut state = self.state.lock().await;
        state.deleted_sprites.record(sprite_id, restore);
        state.sprites.retain(|s| s != sprite_id);
        info!(sprite = sprite_id, "sprite deleted");
        Ok(())
    }

    /// Restore a sprite deleted through [`delete_sprite`](Self::delete_sprite).
    pub async fn restore_sprite(&self, sprite_id: &str) -> Result<()> {
        let restore = self
            .state
            .lock()
            .await
            .deleted_sprites
            .take(sprite_id)
            .ok_or_else(|| GameUtilsError::NotFound(format!("no deleted sprite {sprite_id}")))?;
        if let Err(e) = restore.undo().await {
            let mut state = self.state.lock().await;
            if !state.deleted_sprites.contains(sprite_id) {
                state.deleted_sprites.record(sprite_id, restore);
            }
            warn!(sprite = sprite_id, error = %e, "sprite restore failed, kept for retry");
            return Err(e);
        }
        self.state.lock().await.sprites.push(sprite_id.to_string());
        info!(sprite = sprite_id, "sprite restored");
        Ok(())
    }

    /// Fetch an image and add it as a costume of the target sprite.
    pub async fn create_costume(&self, uri: &str, target: &BlockTarget) -> Result<CostumeHandle> {
        let sprite_id = target.sprite_id.as_deref().ok_or(GameUtilsError::TargetNotSprite)?;
        let asset = self.retriever.fetch_resource(uri).await?;
        let handle = self.host.sprites.add_costume(asset, sprite_id).await?;
        info!(sprite = sprite_id, costume = %handle.id, "costume created");
        self.state.lock().await.costumes.push(handle.id.clone());
        Ok(handle)
    }

    /// Remove the named costume from the target sprite.
    pub async fn delete_costume(&self, name: &str, target: &BlockTarget) -> Result<()> {
        let sprite_id = target.sprite_id.as_deref().ok_or(GameUtilsError::TargetNotSprite)?;
        let costume_id = target
            .costumes
            .get(name)
            .ok_or_else(|| GameUtilsError::NotFound(format!("costume {name}")))?;
        self.host
            .sprites
            .delete_costume(sprite_id, costume_id)
            .await?;
        self.state
            .lock()
            .await
            .costumes
            .retain(|c| c != costume_id);
        info!(sprite = sprite_id, costume = %costume_id, "costume deleted");
        Ok(())
    }

    pub fn play_audio_from_url(&self, url: &str) -> Result<()> {
        self.host.audio.play(url)
    }

    pub fn stop_audio(&self) {
        self.host.audio.stop();
    }

    pub fn sounds_done(&self) -> bool {
        self.host.audio.is_ended()
    }

    pub async fn dynload_extension(&self, uri: &str) -> Result<()> {
        self.host.extensions.load_extension_url(uri).await
    }

    /// Ids of live sprites this extension created or restored.
    pub async fn sprites(&self) -> Vec<String> {
        self.state.lock().await.sprites.clone()
    }

    /// Ids of costumes this extension created.
    pub async fn costumes(&self) -> Vec<String> {
        self.state.lock().await.costumes.clone()
    }

    /// Whether `sprite_id` has a pending restore.
    pub async fn is_restorable(&self, sprite_id: &str) -> bool {
        self.state.lock().await.deleted_sprites.contains(sprite_id)
    }
}

/// Read a block argument as a string. Numbers are accepted, since the
/// host passes numeric-looking text fields as numbers.
fn string_arg(args: &Value, name: &str) -> Result<String> {
    match args.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(GameUtilsError::InvalidArgs(format!(
            "argument `{name}` must be a string, got {other}"
        ))),
        None => Err(GameUtilsError::InvalidArgs(format!(
            "missing argument `{name}`"
        ))),
    }
}

/// The block palette declared to the host.
pub fn extension_info() -> ExtensionInfo {
    ExtensionInfo {
        id: EXTENSION_ID.to_string(),
        name: "GameUtils".to_string(),
        block_icon_uri: None,
        menu_icon_uri: None,
        color1: "#41e2d0".to_string(),
        color2: "#0DA57A".to_string(),
        blocks: vec![
            // sprites
            BlockInfo::command("create_sprite", "create sprite from [url]").with_string_arg("url", ""),
            BlockInfo::command("create_sprite_from_json", "create sprite from json [json]")
                .with_string_arg("json", DEFAULT_SPRITE_JSON),
            BlockInfo::command("delete_sprite", "delete sprite [sprite]")
                .with_string_arg("sprite", "sprite1"),
            BlockInfo::command("restore_sprite", "restore sprite [sprite]")
                .with_string_arg("sprite", "sprite1"),
            // costumes
            BlockInfo::command("create_costume", "create costume from [uri]")
                .with_string_arg("costume", "costume1")
                .with_string_arg("uri", DEFAULT_COSTUME_URI),
            BlockInfo::command("delete_costume", "delete costume [costume]")
                .with_string_arg("costume", "costume1"),
            // sound
            BlockInfo::command("playAudioFromURL", "Play audio [URL]")
                .with_string_arg("URL", DEFAULT_AUDIO_URL),
            BlockInfo::command("stopAudio", "Stop audio"),
            BlockInfo::reporter("sounds_done", "Is Sound From URL Done?"),
            BlockInfo::command("DynloadExtension", "load Extension from [uri]")
                .with_string_arg("uri", ""),
        ],
    }
}
