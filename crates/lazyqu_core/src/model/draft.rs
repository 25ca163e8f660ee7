//! Unsaved video draft edited by the UI collaborator.
//!
//! # Responsibility
//! - Hold in-progress field values before validation and commit.
//! - Support both tag-entry modes on top of one canonical `tags` list.
//!
//! # Invariants
//! - `tags` is always normalized: trimmed, non-empty entries.
//! - `tag_input` and `tags` describe the same tag set after every mutation.

use crate::model::tags::{format_tag_input, normalize_tag, parse_tag_input};
use crate::model::video::{parse_iso_date, NewVideoPlan, UploadDay, VideoPlan};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection reason for incremental tag entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEntryError {
    /// Committed value was empty after trimming.
    Blank,
    /// The draft already holds this exact tag.
    Duplicate(String),
}

impl Display for TagEntryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank => write!(f, "tag must not be blank"),
            Self::Duplicate(tag) => write!(f, "tag `{tag}` is already added"),
        }
    }
}

impl Error for TagEntryError {}

/// In-progress field values for one video.
///
/// Tag state is private; it changes only through the entry-mode methods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoDraft {
    pub title: String,
    pub description: String,
    tag_input: String,
    tags: Vec<String>,
    /// Selected week as `YYYY-MM-DD`; empty when no week is selected.
    pub week_start: String,
    pub upload_day: Option<UploadDay>,
}

impl VideoDraft {
    /// Creates an empty draft targeting `week_start`.
    pub fn for_week(week_start: impl Into<String>) -> Self {
        Self {
            week_start: week_start.into(),
            ..Self::default()
        }
    }

    /// Loads a stored record's fields into a draft for editing.
    pub fn from_plan(plan: &VideoPlan) -> Self {
        let mut draft = Self {
            title: plan.title.clone(),
            description: plan.description.clone(),
            week_start: plan.week_start.format("%Y-%m-%d").to_string(),
            upload_day: Some(plan.upload_day),
            ..Self::default()
        };
        draft.set_tags(&plan.tags);
        draft
    }

    /// Normalized tags derived from either entry mode.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Comma-separated tag text as typed, or as rendered from `tags`.
    pub fn tag_input(&self) -> &str {
        &self.tag_input
    }

    /// Replaces the whole tag list, dropping blank entries.
    pub fn set_tags<I, T>(&mut self, tags: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.tags = tags
            .into_iter()
            .filter_map(|tag| normalize_tag(tag.as_ref()))
            .collect();
        self.tag_input = format_tag_input(&self.tags);
    }

    /// Replaces tags from comma-separated input.
    pub fn set_tag_input(&mut self, input: impl Into<String>) {
        self.tag_input = input.into();
        self.tags = parse_tag_input(&self.tag_input);
    }

    /// Adds one tag in incremental-entry mode.
    ///
    /// # Errors
    /// - `Blank` when the value trims to nothing.
    /// - `Duplicate` when the exact trimmed value is already present.
    pub fn commit_tag(&mut self, raw: &str) -> Result<(), TagEntryError> {
        let tag = normalize_tag(raw).ok_or(TagEntryError::Blank)?;
        if self.tags.iter().any(|existing| *existing == tag) {
            return Err(TagEntryError::Duplicate(tag));
        }
        self.tags.push(tag);
        self.tag_input = format_tag_input(&self.tags);
        Ok(())
    }

    /// Removes the first tag equal to `tag`. Returns whether one was removed.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        match self.tags.iter().position(|existing| existing == tag) {
            Some(index) => {
                self.tags.remove(index);
                self.tag_input = format_tag_input(&self.tags);
                true
            }
            None => false,
        }
    }

    /// Converts the draft into store input, trimming text fields.
    ///
    /// Returns `None` when `week_start` is not a valid `YYYY-MM-DD` date.
    /// A missing upload day falls back to the default weekday.
    pub fn to_new_plan(&self) -> Option<NewVideoPlan> {
        let week_start = parse_iso_date(&self.week_start)?;
        Some(NewVideoPlan {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            tags: self.tags.clone(),
            week_start,
            upload_day: self.upload_day.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{TagEntryError, VideoDraft};

    #[test]
    fn commit_tag_rejects_blank_and_exact_duplicates() {
        let mut draft = VideoDraft::default();
        draft.commit_tag(" rust ").unwrap();
        assert_eq!(draft.commit_tag("   "), Err(TagEntryError::Blank));
        assert_eq!(
            draft.commit_tag("rust"),
            Err(TagEntryError::Duplicate("rust".to_string()))
        );
        draft.commit_tag("Rust").unwrap();
        assert_eq!(draft.tags(), ["rust", "Rust"]);
        assert_eq!(draft.tag_input(), "rust, Rust");
    }

    #[test]
    fn set_tag_input_refreshes_normalized_tags() {
        let mut draft = VideoDraft::default();
        draft.set_tag_input("a, , b ,c");
        assert_eq!(draft.tags(), ["a", "b", "c"]);
        assert!(draft.remove_tag("b"));
        assert!(!draft.remove_tag("b"));
        assert_eq!(draft.tag_input(), "a, c");
    }

    #[test]
    fn set_tags_keeps_input_in_step() {
        let mut draft = VideoDraft::default();
        draft.set_tags([" launch ", "", "  ", "vlog"]);
        assert_eq!(draft.tags(), ["launch", "vlog"]);
        assert_eq!(draft.tag_input(), "launch, vlog");

        draft.set_tags(Vec::<String>::new());
        assert!(draft.tags().is_empty());
        assert_eq!(draft.tag_input(), "");
    }

    #[test]
    fn to_new_plan_requires_valid_week() {
        let mut draft = VideoDraft::for_week("not-a-date");
        draft.title = "  Title  ".to_string();
        assert!(draft.to_new_plan().is_none());

        draft.week_start = "2025-01-05".to_string();
        let plan = draft.to_new_plan().unwrap();
        assert_eq!(plan.title, "Title");
        assert_eq!(plan.week_start.to_string(), "2025-01-05");
    }
}
