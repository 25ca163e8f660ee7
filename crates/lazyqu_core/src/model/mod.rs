//! Domain model for planned videos and their editable drafts.
//!
//! # Responsibility
//! - Define the canonical `VideoPlan` record persisted by the store.
//! - Define the unsaved `VideoDraft` edited by the UI collaborator.
//! - Own tag normalization shared by both tag-entry modes.
//!
//! # Invariants
//! - Every record is identified by a stable, non-empty `VideoId`.
//! - Persisted tags never contain empty or whitespace-only entries.

pub mod draft;
pub mod tags;
pub mod video;
