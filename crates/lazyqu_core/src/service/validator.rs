//! Draft validation.
//!
//! # Responsibility
//! - Map a draft to human-readable errors keyed by field.
//!
//! # Invariants
//! - Every rule runs; violations are collected, never short-circuited.
//! - At most one message per field; the first failing check for a field wins.
//! - Lengths are counted in characters after trimming.

use crate::config::PlannerConfig;
use crate::model::draft::VideoDraft;
use crate::model::tags::total_tag_len;
use crate::model::video::parse_iso_date;
use serde::Serialize;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MIN_CHARS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 5000;
pub const TAGS_MAX_TOTAL_CHARS: usize = 500;

pub(crate) const INVALID_WEEK_MESSAGE: &str = "Week start must be a valid YYYY-MM-DD date";

/// Draft field an error message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    Title,
    Description,
    Tags,
    WeekStart,
    UploadDay,
}

impl DraftField {
    /// Field name as exposed to the UI collaborator.
    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Tags => "tags",
            Self::WeekStart => "weekStart",
            Self::UploadDay => "uploadDay",
        }
    }
}

impl Display for DraftField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Field-keyed validation messages. Empty means the draft is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<DraftField, String>,
}

impl ValidationErrors {
    pub(crate) fn single(field: DraftField, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.insert(field, message);
        errors
    }

    fn insert(&mut self, field: DraftField, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: DraftField) -> bool {
        self.errors.contains_key(&field)
    }

    /// Failing fields in declaration order.
    pub fn fields(&self) -> Vec<DraftField> {
        self.errors.keys().copied().collect()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, DraftField, String> {
        self.errors.iter()
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, (field, message)) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl Error for ValidationErrors {}

/// Rule switches for the form variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Reject drafts without an explicit upload day.
    pub require_upload_day: bool,
}

impl From<&PlannerConfig> for ValidationOptions {
    fn from(config: &PlannerConfig) -> Self {
        Self {
            require_upload_day: config.require_upload_day,
        }
    }
}

/// Validates `draft`, reporting every failing field.
pub fn validate_draft(draft: &VideoDraft, options: ValidationOptions) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    check_length(
        &mut errors,
        DraftField::Title,
        &draft.title,
        TITLE_MIN_CHARS,
        TITLE_MAX_CHARS,
        [
            "Video title is required",
            "Title must be at least 3 characters long",
            "Title must not exceed 100 characters",
        ],
    );
    check_length(
        &mut errors,
        DraftField::Description,
        &draft.description,
        DESCRIPTION_MIN_CHARS,
        DESCRIPTION_MAX_CHARS,
        [
            "Video description is required",
            "Description must be at least 10 characters long",
            "Description must not exceed 5000 characters",
        ],
    );

    if total_tag_len(draft.tags()) > TAGS_MAX_TOTAL_CHARS {
        errors.insert(
            DraftField::Tags,
            "Total tags content must not exceed 500 characters",
        );
    }

    if draft.week_start.trim().is_empty() {
        errors.insert(DraftField::WeekStart, "Please select a week");
    } else if parse_iso_date(&draft.week_start).is_none() {
        errors.insert(DraftField::WeekStart, INVALID_WEEK_MESSAGE);
    }

    if options.require_upload_day && draft.upload_day.is_none() {
        errors.insert(DraftField::UploadDay, "Please select an upload day");
    }

    errors
}

/// `messages` are `[required, too short, too long]`.
fn check_length(
    errors: &mut ValidationErrors,
    field: DraftField,
    value: &str,
    min: usize,
    max: usize,
    messages: [&str; 3],
) {
    let len = value.trim().chars().count();
    let [required, too_short, too_long] = messages;
    if len == 0 {
        errors.insert(field, required);
    } else if len < min {
        errors.insert(field, too_short);
    } else if len > max {
        errors.insert(field, too_long);
    }
}
