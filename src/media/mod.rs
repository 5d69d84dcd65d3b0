//! Lazy loading of media that sits behind authenticated endpoints.
//!
//! Photos and attachments cannot be linked directly; each one is fetched on
//! first need, turned into a local handle and kept for the lifetime of the
//! cache. Every id moves `Idle -> Loading -> Loaded | Error` and only an
//! explicit `retry` leaves `Error`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::api::{ApiClient, Blob};
use crate::errors::ClientError;
use crate::models::{MediaFile, MediaKind};

/// Source of media bytes.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    async fn fetch(&self, media: &MediaFile) -> Result<Blob, ClientError>;
}

#[async_trait]
impl MediaFetcher for ApiClient {
    async fn fetch(&self, media: &MediaFile) -> Result<Blob, ClientError> {
        self.get_blob(&media.url).await
    }
}

/// Locally dereferenceable handle for fetched media.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaHandle {
    /// Opaque `blob:` URL, unique per fetch
    pub url: String,
    pub content_type: String,
    pub kind: MediaKind,
    pub bytes: Bytes,
}

impl MediaHandle {
    fn new(media: &MediaFile, blob: Blob) -> Self {
        let content_type = blob
            .content_type
            .or_else(|| media.mime_type.clone())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let kind = match MediaKind::from_mime(&content_type) {
            MediaKind::Other => MediaKind::from_filename(&media.filename),
            kind => kind,
        };

        Self {
            url: format!("blob:dispoma/{}", Uuid::new_v4()),
            content_type,
            kind,
            bytes: blob.bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MediaState {
    Idle,
    Loading,
    Loaded(MediaHandle),
    Error(String),
}

impl MediaState {
    pub fn is_loading(&self) -> bool {
        matches!(self, MediaState::Loading)
    }

    pub fn handle(&self) -> Option<&MediaHandle> {
        match self {
            MediaState::Loaded(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            MediaState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Default)]
struct Slots {
    /// Bumped by `release_all`; fetches started in an older cycle are dropped.
    cycle: u64,
    states: HashMap<i64, MediaState>,
}

impl Slots {
    fn loaded(&self) -> usize {
        self.states
            .values()
            .filter(|s| matches!(s, MediaState::Loaded(_)))
            .count()
    }
}

/// Per-view media cache keyed by media id.
pub struct MediaCache<F: MediaFetcher> {
    fetcher: Arc<F>,
    slots: RwLock<Slots>,
}

impl<F: MediaFetcher> MediaCache<F> {
    pub fn new(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            slots: RwLock::new(Slots::default()),
        }
    }

    pub async fn get(&self, id: i64) -> MediaState {
        let slots = self.slots.read().await;
        slots.states.get(&id).cloned().unwrap_or(MediaState::Idle)
    }

    /// Fetch `media` unless it is already loading, loaded or failed.
    ///
    /// Returns the state after this call: the fresh result when this call did
    /// the fetch, otherwise the state found in the cache.
    pub async fn request(&self, media: &MediaFile) -> MediaState {
        let cycle = {
            let mut slots = self.slots.write().await;
            match slots.states.get(&media.id) {
                None | Some(MediaState::Idle) => {
                    slots.states.insert(media.id, MediaState::Loading);
                    slots.cycle
                }
                Some(existing) => return existing.clone(),
            }
        };

        tracing::debug!("Fetching media {} ({})", media.id, media.filename);
        let state = match self.fetcher.fetch(media).await {
            Ok(blob) => MediaState::Loaded(MediaHandle::new(media, blob)),
            Err(e) => {
                tracing::warn!("Failed to load media {}: {}", media.id, e);
                MediaState::Error(e.user_message())
            }
        };

        let mut slots = self.slots.write().await;
        // Released while in flight: drop the result.
        if slots.cycle != cycle
            || !matches!(slots.states.get(&media.id), Some(MediaState::Loading))
        {
            tracing::debug!("Discarding media {} fetched before release", media.id);
            return MediaState::Idle;
        }
        slots.states.insert(media.id, state.clone());
        state
    }

    /// Fetch several items one after another, skipping ids already handled.
    pub async fn request_all(&self, media: &[MediaFile]) -> Vec<MediaState> {
        let mut results = Vec::with_capacity(media.len());
        for item in media {
            results.push(self.request(item).await);
        }
        results
    }

    /// Clear a failed fetch and try again. Other states are returned unchanged.
    pub async fn retry(&self, media: &MediaFile) -> MediaState {
        {
            let mut slots = self.slots.write().await;
            match slots.states.get(&media.id) {
                Some(MediaState::Error(_)) => {
                    slots.states.remove(&media.id);
                }
                Some(existing) => return existing.clone(),
                None => {}
            }
        }
        self.request(media).await
    }

    /// Drop every handle and state. Returns how many handles were released.
    pub async fn release_all(&self) -> usize {
        let mut slots = self.slots.write().await;
        let released = slots.loaded();
        slots.states.clear();
        slots.cycle += 1;
        if released > 0 {
            tracing::debug!("Released {} media handles", released);
        }
        released
    }

    pub async fn loaded_count(&self) -> usize {
        self.slots.read().await.loaded()
    }
}

impl<F: MediaFetcher> Drop for MediaCache<F> {
    fn drop(&mut self) {
        let slots = self.slots.get_mut();
        let released = slots.loaded();
        slots.states.clear();
        if released > 0 {
            tracing::debug!("Released {} media handles on drop", released);
        }
    }
}
