//! Video plan domain model.
//!
//! # Responsibility
//! - Define the record shape stored in the durable blob.
//! - Keep the wire field names stable (`weekStart`, `uploadDay`, `createdAt`).
//!
//! # Invariants
//! - `id` is assigned once by the store and never reused.
//! - `created_at` is stamped once and survives every update.
//! - `tags` never contains blank entries.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso date regex"));

/// Opaque identifier of one planned video.
///
/// New ids are UUID v4 text. Ids written by older front-ends (for example
/// millisecond timestamps) are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing id value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for VideoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Day of the target week on which the video should go live.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum UploadDay {
    #[default]
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl UploadDay {
    /// All labels in selector order.
    pub const ALL: [UploadDay; 7] = [
        UploadDay::Monday,
        UploadDay::Tuesday,
        UploadDay::Wednesday,
        UploadDay::Thursday,
        UploadDay::Friday,
        UploadDay::Saturday,
        UploadDay::Sunday,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    /// Parses a weekday label, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|day| day.label().eq_ignore_ascii_case(value))
    }
}

impl Display for UploadDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Model-level invariant violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoValidationError {
    /// The record id is empty.
    EmptyId,
    /// Tag at `index` is empty or whitespace-only.
    BlankTag { index: usize },
}

impl Display for VideoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "video id must not be empty"),
            Self::BlankTag { index } => write!(f, "tag at position {index} is blank"),
        }
    }
}

impl Error for VideoValidationError {}

/// Input for creating a record; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVideoPlan {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub week_start: NaiveDate,
    pub upload_day: UploadDay,
}

impl NewVideoPlan {
    /// Builds a record with the given identity fields.
    pub fn into_plan(self, id: VideoId, created_at: DateTime<Utc>) -> VideoPlan {
        VideoPlan {
            id,
            title: self.title,
            description: self.description,
            tags: self.tags,
            week_start: self.week_start,
            upload_day: self.upload_day,
            created_at,
        }
    }
}

/// One planned video as stored in the durable blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPlan {
    pub id: VideoId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// First day of the target week, serialized as `YYYY-MM-DD`.
    pub week_start: NaiveDate,
    #[serde(default)]
    pub upload_day: UploadDay,
    pub created_at: DateTime<Utc>,
}

impl VideoPlan {
    /// Checks the invariants every stored record must satisfy.
    pub fn validate(&self) -> Result<(), VideoValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(VideoValidationError::EmptyId);
        }
        validate_tags(&self.tags)
    }
}

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// Returns `None` for empty input, non-padded fields, surrounding whitespace
/// or impossible dates.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if !ISO_DATE_RE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub(crate) fn validate_tags(tags: &[String]) -> Result<(), VideoValidationError> {
    match tags.iter().position(|tag| tag.trim().is_empty()) {
        Some(index) => Err(VideoValidationError::BlankTag { index }),
        None => Ok(()),
    }
}
