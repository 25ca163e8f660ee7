//! Planner configuration supplied by the host front-end.
//!
//! # Invariants
//! - Every field has a default, so `{}` is a complete configuration.
//! - Unknown fields are rejected to surface typos early.
//! - `week_option_count` never exceeds `MAX_WEEK_OPTION_COUNT`.

use crate::logging::default_log_level;
use chrono::Weekday;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Key under which the collection blob is stored.
pub const DEFAULT_STORAGE_KEY: &str = "creatorVideos";
/// Current week plus eight weeks ahead.
pub const DEFAULT_WEEK_OPTION_COUNT: u32 = 9;
/// Ten years of weeks.
pub const MAX_WEEK_OPTION_COUNT: u32 = 520;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    pub storage_key: String,
    /// Enables the explicit upload-day variant of the form validator.
    pub require_upload_day: bool,
    pub week_starts_on: Weekday,
    #[serde(deserialize_with = "bounded_week_option_count")]
    pub week_option_count: u32,
    pub log_level: Option<String>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            require_upload_day: false,
            week_starts_on: Weekday::Sun,
            week_option_count: DEFAULT_WEEK_OPTION_COUNT,
            log_level: None,
        }
    }
}

impl PlannerConfig {
    /// Parses host-supplied JSON configuration.
    pub fn from_json_str(value: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(value)
    }

    /// Configured log level, falling back to the build-mode default.
    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }

    /// Week option count clamped to `MAX_WEEK_OPTION_COUNT`, for configs
    /// built in code rather than parsed.
    pub fn bounded_week_option_count(&self) -> u32 {
        self.week_option_count.min(MAX_WEEK_OPTION_COUNT)
    }
}

fn bounded_week_option_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let count = u32::deserialize(deserializer)?;
    if count > MAX_WEEK_OPTION_COUNT {
        return Err(D::Error::custom(format!(
            "week_option_count {count} exceeds maximum {MAX_WEEK_OPTION_COUNT}"
        )));
    }
    Ok(count)
}
