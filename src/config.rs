//! Validation policy.
//!
//! Numeric limits and scoping switches for the constraint checks. Every
//! field has a default matching the established school rules, so a policy
//! file only needs to name what it changes.
//!
//! ```
//! use u_timetable::{DailyScope, ValidationPolicy};
//!
//! let policy = ValidationPolicy::from_json_str(r#"{ "min_gap_minutes": 10 }"#).unwrap();
//! assert_eq!(policy.min_gap_minutes, 10);
//! assert_eq!(policy.max_total_entries, 30);
//! assert_eq!(policy.daily_scope, DailyScope::AllEntries);
//! ```

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors from loading or checking a policy.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Policy file could not be read.
    #[error("failed to read policy file: {0}")]
    Io(#[from] std::io::Error),

    /// Policy JSON is malformed.
    #[error("failed to parse policy: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds an unusable value.
    #[error("invalid policy field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Which teacher entries count toward the daily ceiling and gap checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DailyScope {
    /// Every entry of the teacher, regardless of days.
    #[default]
    AllEntries,
    /// Only entries whose day pattern shares a weekday with the candidate.
    SharedWeekday,
}

/// Limits applied by the standard pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Maximum entries per teacher.
    pub max_total_entries: usize,
    /// Maximum entries per teacher per day.
    pub max_daily_entries: usize,
    /// Minimum minutes between two classes of the same teacher.
    pub min_gap_minutes: u32,
    /// Entries counted by the daily ceiling and gap checks.
    pub daily_scope: DailyScope,
    /// Compare only entries from the candidate's own term.
    pub term_scoped: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            max_total_entries: 30,
            max_daily_entries: 8,
            min_gap_minutes: 15,
            daily_scope: DailyScope::AllEntries,
            term_scoped: false,
        }
    }
}

impl ValidationPolicy {
    /// Parses and checks a JSON policy.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Reads and checks a JSON policy file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Rejects ceilings that would refuse every entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_total_entries == 0 {
            return Err(ConfigError::Invalid {
                field: "max_total_entries",
                reason: "must be at least 1".into(),
            });
        }
        if self.max_daily_entries == 0 {
            return Err(ConfigError::Invalid {
                field: "max_daily_entries",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Minimum gap as a duration.
    pub fn min_gap(&self) -> Duration {
        Duration::minutes(i64::from(self.min_gap_minutes))
    }

    /// Sets the total ceiling.
    pub fn with_max_total_entries(mut self, max: usize) -> Self {
        self.max_total_entries = max;
        self
    }

    /// Sets the daily ceiling.
    pub fn with_max_daily_entries(mut self, max: usize) -> Self {
        self.max_daily_entries = max;
        self
    }

    /// Sets the minimum gap.
    pub fn with_min_gap_minutes(mut self, minutes: u32) -> Self {
        self.min_gap_minutes = minutes;
        self
    }

    /// Sets the daily scope.
    pub fn with_daily_scope(mut self, scope: DailyScope) -> Self {
        self.daily_scope = scope;
        self
    }

    /// Enables or disables term scoping.
    pub fn with_term_scoped(mut self, scoped: bool) -> Self {
        self.term_scoped = scoped;
        self
    }
}
