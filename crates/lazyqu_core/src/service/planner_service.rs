//! Planner use-case service.
//!
//! # Responsibility
//! - Own the draft, the edit state and the selected week.
//! - Gate every create/update through `validate_draft`.
//! - Route destructive actions through a caller-supplied confirmation.
//!
//! # Invariants
//! - A rejected draft never mutates the store.
//! - Edit state is `Idle` or `Editing(id)`; it leaves `Editing` on a
//!   successful submit, on `cancel_edit`, or when the edited record vanishes.
//! - Declined confirmations never mutate the store.

use crate::config::PlannerConfig;
use crate::filter::week::{
    count_week, select_week, upcoming_weeks, week_label, week_start_for, WeekOption,
};
use crate::model::draft::VideoDraft;
use crate::model::video::{parse_iso_date, VideoId, VideoPlan, VideoValidationError};
use crate::repo::video_store::{RepoError, VideoStore};
use crate::service::validator::{
    validate_draft, DraftField, ValidationErrors, ValidationOptions, INVALID_WEEK_MESSAGE,
};
use crate::storage::BlobStorage;
use chrono::{Local, NaiveDate, Weekday};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for planner use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    /// Draft failed form validation; nothing was stored.
    Validation(ValidationErrors),
    /// Edited record no longer exists; the edit was cancelled.
    NotFound(VideoId),
    /// Record failed model invariants at the store boundary.
    InvalidRecord(VideoValidationError),
}

impl Display for PlannerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => write!(f, "invalid draft: {errors}"),
            Self::NotFound(id) => write!(f, "video not found: {id}"),
            Self::InvalidRecord(err) => write!(f, "invalid video record: {err}"),
        }
    }
}

impl Error for PlannerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::NotFound(_) => None,
            Self::InvalidRecord(err) => Some(err),
        }
    }
}

impl From<RepoError> for PlannerError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::InvalidRecord(err),
        }
    }
}

/// Yes/no confirmation supplied by the UI collaborator.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Whether the form is creating a new record or editing an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing(VideoId),
}

/// Counters shown next to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerStats {
    pub total: usize,
    pub selected_week: usize,
}

/// Controller wiring store, week filter and validator together.
pub struct PlannerService<S: BlobStorage> {
    store: VideoStore<S>,
    options: ValidationOptions,
    week_starts_on: Weekday,
    week_option_count: u32,
    today: NaiveDate,
    selected_week: String,
    draft: VideoDraft,
    edit_state: EditState,
}

impl<S: BlobStorage> PlannerService<S> {
    /// Loads the collection from `storage` and selects the current week.
    pub fn open(storage: S, config: &PlannerConfig) -> Self {
        let store = VideoStore::load(storage, config.storage_key.as_str());
        Self::new(store, config)
    }

    /// Wraps an already loaded store and selects the current week.
    pub fn new(store: VideoStore<S>, config: &PlannerConfig) -> Self {
        Self::with_today(store, config, Local::now().date_naive())
    }

    /// Like `new`, with an explicit notion of today.
    pub fn with_today(store: VideoStore<S>, config: &PlannerConfig, today: NaiveDate) -> Self {
        let selected_week = format_week(week_start_for(today, config.week_starts_on));
        Self {
            store,
            options: ValidationOptions::from(config),
            week_starts_on: config.week_starts_on,
            week_option_count: config.bounded_week_option_count(),
            today,
            draft: VideoDraft::for_week(selected_week.as_str()),
            selected_week,
            edit_state: EditState::Idle,
        }
    }

    pub fn store(&self) -> &VideoStore<S> {
        &self.store
    }

    pub fn draft(&self) -> &VideoDraft {
        &self.draft
    }

    /// Mutable draft for field edits by the UI collaborator.
    pub fn draft_mut(&mut self) -> &mut VideoDraft {
        &mut self.draft
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit_state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.edit_state, EditState::Editing(_))
    }

    /// Selected week as `YYYY-MM-DD`, or empty when nothing is selected.
    pub fn selected_week(&self) -> &str {
        &self.selected_week
    }

    /// Changes the selected week; the draft targets the same week.
    pub fn set_selected_week(&mut self, week_start: impl Into<String>) {
        self.selected_week = week_start.into();
        self.draft.week_start = self.selected_week.clone();
    }

    /// Selectable weeks starting with the current one.
    pub fn week_options(&self) -> Vec<WeekOption> {
        upcoming_weeks(self.today, self.week_option_count, self.week_starts_on)
    }

    /// Records planned for the selected week, in stored order.
    pub fn visible_videos(&self) -> Vec<VideoPlan> {
        select_week(self.store.videos(), &self.selected_week)
    }

    pub fn stats(&self) -> PlannerStats {
        let selected_week = parse_iso_date(&self.selected_week)
            .map_or(0, |week| count_week(self.store.videos(), week));
        PlannerStats {
            total: self.store.len(),
            selected_week,
        }
    }

    /// Validates the current draft without submitting it.
    pub fn validate(&self) -> ValidationErrors {
        validate_draft(&self.draft, self.options)
    }

    /// Submits the current draft as a create or, while editing, an update.
    pub fn submit(&mut self) -> Result<VideoPlan, PlannerError> {
        let editing_id = match &self.edit_state {
            EditState::Idle => None,
            EditState::Editing(id) => Some(id.clone()),
        };
        self.create_or_update(self.draft.clone(), editing_id)
    }

    /// Validates `draft` and stores it as a new record or over `editing_id`.
    ///
    /// On success the draft and edit state are reset.
    ///
    /// # Errors
    /// - `Validation` when any field fails; the store is untouched.
    /// - `NotFound` when `editing_id` no longer exists; the edit is cancelled.
    pub fn create_or_update(
        &mut self,
        draft: VideoDraft,
        editing_id: Option<VideoId>,
    ) -> Result<VideoPlan, PlannerError> {
        let errors = validate_draft(&draft, self.options);
        if !errors.is_empty() {
            warn!(
                "event=draft_rejected module=service status=invalid fields={}",
                errors
                    .fields()
                    .iter()
                    .map(|field| field.name())
                    .collect::<Vec<_>>()
                    .join(",")
            );
            return Err(PlannerError::Validation(errors));
        }

        let new_video = draft.to_new_plan().ok_or_else(|| {
            PlannerError::Validation(ValidationErrors::single(
                DraftField::WeekStart,
                INVALID_WEEK_MESSAGE,
            ))
        })?;

        let saved = match editing_id {
            None => self.store.add(new_video)?,
            Some(id) => {
                let Some(created_at) = self.store.get(&id).map(|existing| existing.created_at)
                else {
                    warn!("event=edit_lost module=service status=not_found video_id={id}");
                    self.cancel_edit();
                    return Err(PlannerError::NotFound(id));
                };
                self.store.update(new_video.into_plan(id, created_at))?
            }
        };

        self.reset_draft();
        Ok(saved)
    }

    /// Loads `video` into the draft and switches to its week.
    pub fn begin_edit(&mut self, video: &VideoPlan) {
        self.draft = VideoDraft::from_plan(video);
        self.selected_week = self.draft.week_start.clone();
        self.edit_state = EditState::Editing(video.id.clone());
        debug!(
            "event=edit_begin module=service status=ok video_id={}",
            video.id
        );
    }

    /// Discards the draft without touching the store.
    pub fn cancel_edit(&mut self) {
        self.reset_draft();
    }

    /// Deletes one record after `prompt` agrees. Returns whether it was removed.
    pub fn delete(&mut self, id: &VideoId, prompt: &mut dyn ConfirmPrompt) -> bool {
        let Some(video) = self.store.get(id) else {
            debug!("event=video_delete module=service status=not_found video_id={id}");
            return false;
        };

        let message = format!("Are you sure you want to delete \"{}\"?", video.title);
        if !prompt.confirm(&message) {
            debug!("event=video_delete module=service status=declined video_id={id}");
            return false;
        }

        let removed = self.store.remove(id).is_some();
        if self.edit_state == EditState::Editing(id.clone()) {
            self.cancel_edit();
        }
        removed
    }

    /// Deletes every record of `week_start` after `prompt` agrees.
    ///
    /// Returns the number removed. Nothing is asked when the week is empty
    /// or `week_start` is not a valid date.
    pub fn clear_week(&mut self, week_start: &str, prompt: &mut dyn ConfirmPrompt) -> usize {
        let Some(week) = parse_iso_date(week_start) else {
            return 0;
        };
        let count = count_week(self.store.videos(), week);
        if count == 0 {
            return 0;
        }

        let noun = if count == 1 { "video" } else { "videos" };
        let message = format!(
            "Are you sure you want to delete all {count} {noun} planned for {}?",
            week_label(week)
        );
        if !prompt.confirm(&message) {
            debug!("event=week_clear module=service status=declined week_start={week}");
            return 0;
        }

        let removed = self.store.remove_by_week(week);
        let edited_gone = match &self.edit_state {
            EditState::Editing(id) => self.store.get(id).is_none(),
            EditState::Idle => false,
        };
        if edited_gone {
            self.cancel_edit();
        }
        info!("event=week_clear module=service status=ok week_start={week} removed={removed}");
        removed
    }

    fn reset_draft(&mut self) {
        self.draft = VideoDraft::for_week(self.selected_week.as_str());
        self.edit_state = EditState::Idle;
    }
}

fn format_week(week_start: NaiveDate) -> String {
    week_start.format("%Y-%m-%d").to_string()
}
