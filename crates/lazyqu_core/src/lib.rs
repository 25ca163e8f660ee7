//! Core domain logic for LazyQu, a weekly video upload planner.
//! This crate is the single source of truth for planning invariants.

pub mod config;
pub mod db;
pub mod filter;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use config::{PlannerConfig, DEFAULT_STORAGE_KEY, MAX_WEEK_OPTION_COUNT};
pub use filter::week::{select_week, upcoming_weeks, week_label, week_start_for, WeekOption};
pub use logging::{
    default_log_level, init_logging, init_logging_with_config, logging_status, LogLevel,
    LoggingError,
};
pub use model::draft::{TagEntryError, VideoDraft};
pub use model::tags::{normalize_tags, parse_tag_input};
pub use model::video::{
    parse_iso_date, NewVideoPlan, UploadDay, VideoId, VideoPlan, VideoValidationError,
};
pub use repo::video_store::{RepoError, RepoResult, VideoStore};
pub use service::planner_service::{
    ConfirmPrompt, EditState, PlannerError, PlannerService, PlannerStats,
};
pub use service::validator::{validate_draft, DraftField, ValidationErrors, ValidationOptions};
pub use storage::{
    BlobStorage, MemoryBlobStorage, SqliteBlobStorage, StorageError, StorageFaults, StorageResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
