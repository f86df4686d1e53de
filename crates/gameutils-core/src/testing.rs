//! In-memory collaborators shared by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gameutils_platform::http::{HttpClient, HttpError, HttpResponse};
use gameutils_types::{ArchiveBlob, FetchedAsset, GameUtilsError, Result};

use crate::host::{AudioPlayer, CostumeHandle, ExtensionLoader, ReversibleAction, SpriteHandle, SpriteHost};

struct Route {
    status: u16,
    body: Vec<u8>,
    content_type: Option<String>,
}

/// HTTP client serving canned responses. Unknown URLs fail at the transport level.
#[derive(Default)]
pub struct FakeHttp {
    routes: HashMap<String, Route>,
    calls: Mutex<HashMap<String, usize>>,
}

impl FakeHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(self, url: &str, body: &[u8]) -> Self {
        self.with_route(url, 200, body, None)
    }

    pub fn with_typed(self, url: &str, body: &[u8], content_type: &str) -> Self {
        self.with_route(url, 200, body, Some(content_type))
    }

    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.with_route(url, status, b"", None)
    }

    fn with_route(mut self, url: &str, status: u16, body: &[u8], content_type: Option<&str>) -> Self {
        self.routes.insert(
            url.to_string(),
            Route {
                status,
                body: body.to_vec(),
                content_type: content_type.map(str::to_string),
            },
        );
        self
    }

    pub fn calls(&self, url: &str) -> usize {
        self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl HttpClient for FakeHttp {
    async fn request(
        &self,
        _method: &str,
        url: &str,
        _headers: &HashMap<String, String>,
        _body: Option<&[u8]>,
    ) -> std::result::Result<HttpResponse, HttpError> {
        *self.calls.lock().unwrap().entry(url.to_string()).or_default() += 1;
        let route = self
            .routes
            .get(url)
            .ok_or_else(|| format!("connection refused: {url}"))?;
        let mut headers = HashMap::new();
        if let Some(ct) = &route.content_type {
            headers.insert("content-type".to_string(), ct.clone());
        }
        Ok(HttpResponse {
            status: route.status,
            headers,
            body: route.body.clone(),
        })
    }
}

/// Sprite host recording every call.
#[derive(Default)]
pub struct FakeHost {
    next_id: AtomicUsize,
    pub added: Mutex<Vec<ArchiveBlob>>,
    pub live_sprites: Arc<Mutex<Vec<String>>>,
    pub costumes: Mutex<Vec<(String, FetchedAsset)>>,
    pub deleted_costumes: Mutex<Vec<String>>,
    pub fail_ingest: AtomicBool,
    /// Number of upcoming restore attempts that fail with a host error.
    pub undo_failures: Arc<AtomicUsize>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }
}

struct RestoreSprite {
    id: String,
    live: Arc<Mutex<Vec<String>>>,
    failures: Arc<AtomicUsize>,
}

#[async_trait]
impl ReversibleAction for RestoreSprite {
    async fn undo(&self) -> Result<()> {
        let busy = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if busy {
            return Err(GameUtilsError::Host("busy".into()));
        }
        self.live.lock().unwrap().push(self.id.clone());
        Ok(())
    }
}

#[async_trait]
impl SpriteHost for FakeHost {
    async fn add_sprite(&self, archive: ArchiveBlob) -> Result<SpriteHandle> {
        if self.fail_ingest.load(Ordering::SeqCst) {
            return Err(GameUtilsError::Host("ingestion rejected".into()));
        }
        let id = format!("sprite-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.added.lock().unwrap().push(archive);
        self.live_sprites.lock().unwrap().push(id.clone());
        Ok(SpriteHandle {
            id,
            name: "Sprite".into(),
        })
    }

    async fn delete_sprite(&self, sprite_id: &str) -> Result<Box<dyn ReversibleAction>> {
        let mut live = self.live_sprites.lock().unwrap();
        let pos = live
            .iter()
            .position(|s| s == sprite_id)
            .ok_or_else(|| GameUtilsError::NotFound(format!("sprite {sprite_id}")))?;
        live.remove(pos);
        Ok(Box::new(RestoreSprite {
            id: sprite_id.to_string(),
            live: self.live_sprites.clone(),
            failures: self.undo_failures.clone(),
        }))
    }

    async fn add_costume(&self, asset: FetchedAsset, sprite_id: &str) -> Result<CostumeHandle> {
        let id = format!("costume-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.costumes
            .lock()
            .unwrap()
            .push((sprite_id.to_string(), asset));
        Ok(CostumeHandle { id })
    }

    async fn delete_costume(&self, _sprite_id: &str, costume_id: &str) -> Result<()> {
        self.deleted_costumes
            .lock()
            .unwrap()
            .push(costume_id.to_string());
        Ok(())
    }
}

/// Audio player tracking the current source.
#[derive(Default)]
pub struct FakeAudio {
    pub source: Mutex<Option<String>>,
    pub ended: AtomicBool,
}

impl AudioPlayer for FakeAudio {
    fn play(&self, url: &str) -> Result<()> {
        *self.source.lock().unwrap() = Some(url.to_string());
        self.ended.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) {
        *self.source.lock().unwrap() = None;
    }

    fn is_ended(&self) -> bool {
        self.ended.load(Ordering::SeqCst)
    }
}

/// Extension loader recording requested URLs.
#[derive(Default)]
pub struct FakeLoader {
    pub loaded: Mutex<Vec<String>>,
}

#[async_trait]
impl ExtensionLoader for FakeLoader {
    async fn load_extension_url(&self, url: &str) -> Result<()> {
        self.loaded.lock().unwrap().push(url.to_string());
        Ok(())
    }
}
