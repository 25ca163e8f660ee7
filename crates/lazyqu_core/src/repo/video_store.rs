//! Video plan store with write-through blob persistence.
//!
//! # Invariants
//! - Every mutating call persists before returning, except in memory-only mode.
//! - `created_at` and `id` are never changed by `update`.
//! - A missing, unreadable or malformed blob loads as an empty collection.
//! - After a failed read the stored blob is never written for the lifetime of
//!   the store; the session's changes stay in memory.

use crate::model::video::{NewVideoPlan, VideoId, VideoPlan, VideoValidationError};
use crate::storage::BlobStorage;
use chrono::{NaiveDate, Utc};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Store-level failure for a single operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Record violates a model invariant; nothing was written.
    Validation(VideoValidationError),
    /// No record with this id exists.
    NotFound(VideoId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "video not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<VideoValidationError> for RepoError {
    fn from(value: VideoValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Authoritative collection of video plans, persisted through `S`.
pub struct VideoStore<S: BlobStorage> {
    storage: S,
    key: String,
    videos: Vec<VideoPlan>,
    degraded: bool,
    memory_only: bool,
}

impl<S: BlobStorage> VideoStore<S> {
    /// Loads the collection stored under `key`.
    ///
    /// Never fails: read errors and malformed blobs start an empty collection.
    /// A read error also switches the store to memory-only mode, so the blob
    /// it could not read is left as it was.
    pub fn load(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let (videos, memory_only) = match storage.load(&key) {
            Ok(Some(blob)) => (decode_collection(&blob), false),
            Ok(None) => {
                debug!("event=store_load module=store status=empty reason=absent");
                (Vec::new(), false)
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error error_code=storage_read_failed error={err}"
                );
                (Vec::new(), true)
            }
        };
        info!(
            "event=store_load module=store status=ok count={}",
            videos.len()
        );

        Self {
            storage,
            key,
            videos,
            degraded: memory_only,
            memory_only,
        }
    }

    /// Inserts a new record with a fresh id and creation timestamp.
    pub fn add(&mut self, new_video: NewVideoPlan) -> RepoResult<VideoPlan> {
        let mut id = VideoId::generate();
        while self.position(&id).is_some() {
            id = VideoId::generate();
        }

        let video = new_video.into_plan(id, Utc::now());
        video.validate()?;

        self.videos.push(video.clone());
        self.persist("add");
        info!("event=video_add module=store status=ok video_id={}", video.id);
        Ok(video)
    }

    /// Replaces an existing record, keeping its original `created_at`.
    ///
    /// # Errors
    /// - `NotFound` when no record has `video.id`; the collection is untouched.
    pub fn update(&mut self, mut video: VideoPlan) -> RepoResult<VideoPlan> {
        let index = self
            .position(&video.id)
            .ok_or_else(|| RepoError::NotFound(video.id.clone()))?;
        video.created_at = self.videos[index].created_at;
        video.validate()?;

        self.videos[index] = video.clone();
        self.persist("update");
        info!(
            "event=video_update module=store status=ok video_id={}",
            video.id
        );
        Ok(video)
    }

    /// Deletes one record. Returns the removed record, or `None` when absent.
    pub fn remove(&mut self, id: &VideoId) -> Option<VideoPlan> {
        let index = self.position(id)?;
        let removed = self.videos.remove(index);
        self.persist("remove");
        info!("event=video_remove module=store status=ok video_id={id}");
        Some(removed)
    }

    /// Deletes every record planned for `week_start`. Returns how many went.
    pub fn remove_by_week(&mut self, week_start: NaiveDate) -> usize {
        let before = self.videos.len();
        self.videos.retain(|video| video.week_start != week_start);
        let removed = before - self.videos.len();
        self.persist("remove_by_week");
        info!(
            "event=week_clear module=store status=ok week_start={week_start} removed={removed}"
        );
        removed
    }

    /// Returns a copy of the full collection in stored order.
    pub fn all(&self) -> Vec<VideoPlan> {
        self.videos.clone()
    }

    /// Read-only view of the collection in stored order.
    pub fn videos(&self) -> &[VideoPlan] {
        &self.videos
    }

    pub fn get(&self, id: &VideoId) -> Option<&VideoPlan> {
        self.videos.iter().find(|video| video.id == *id)
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    /// Whether the last storage access failed and memory is the only copy.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Whether the initial read failed and writes are suppressed.
    pub fn is_memory_only(&self) -> bool {
        self.memory_only
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn position(&self, id: &VideoId) -> Option<usize> {
        self.videos.iter().position(|video| video.id == *id)
    }

    fn persist(&mut self, operation: &'static str) {
        if self.memory_only {
            warn!(
                "event=store_save module=store status=skipped op={operation} reason=read_failed count={}",
                self.videos.len()
            );
            return;
        }

        let blob = match serde_json::to_string(&self.videos) {
            Ok(blob) => blob,
            Err(err) => {
                self.degraded = true;
                error!(
                    "event=store_save module=store status=error op={operation} error_code=encode_failed error={err}"
                );
                return;
            }
        };

        match self.storage.save(&self.key, &blob) {
            Ok(()) => {
                if self.degraded {
                    info!("event=store_save module=store status=recovered op={operation}");
                }
                self.degraded = false;
            }
            Err(err) => {
                self.degraded = true;
                error!(
                    "event=store_save module=store status=error op={operation} error_code=storage_write_failed error={err}"
                );
            }
        }
    }
}

/// Decodes a stored blob, discarding it entirely when its shape is unusable.
fn decode_collection(blob: &str) -> Vec<VideoPlan> {
    let videos: Vec<VideoPlan> = match serde_json::from_str(blob) {
        Ok(videos) => videos,
        Err(err) => {
            warn!(
                "event=store_load module=store status=discarded error_code=malformed_blob error={err}"
            );
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    for video in &videos {
        if let Err(err) = video.validate() {
            warn!(
                "event=store_load module=store status=discarded error_code=invalid_record error={err}"
            );
            return Vec::new();
        }
        if !seen.insert(video.id.clone()) {
            warn!(
                "event=store_load module=store status=discarded error_code=duplicate_id video_id={}",
                video.id
            );
            return Vec::new();
        }
    }

    videos
}
