//! Constraint violations.
//!
//! A violation is a recoverable, user-facing rejection. The `kind` lets a
//! caller map it to a response without matching on the message text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of constraint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    /// Teacher load ceiling reached (total or daily).
    Capacity,
    /// Candidate falls inside the minimum gap around another class.
    Gap,
    /// Teacher already teaches at an overlapping time.
    TeacherConflict,
    /// Section already has another teacher at an overlapping time.
    SectionConflict,
    /// Subject already scheduled for the section on the same days.
    DuplicateSubject,
}

/// Which check produced a violation, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CheckId {
    TeacherTotalLoad,
    TeacherDailyLoad,
    MinimumGap,
    TeacherDoubleBooking,
    SectionConflict,
    SubjectDuplication,
}

impl CheckId {
    /// Stable snake_case name, used in logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TeacherTotalLoad => "teacher_total_load",
            Self::TeacherDailyLoad => "teacher_daily_load",
            Self::MinimumGap => "minimum_gap",
            Self::TeacherDoubleBooking => "teacher_double_booking",
            Self::SectionConflict => "section_conflict",
            Self::SubjectDuplication => "subject_duplication",
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub kind: ViolationKind,
    /// Check that fired.
    pub check: CheckId,
    /// Human-readable description.
    pub message: String,
    /// Id of the existing entry the candidate collides with, if any.
    pub conflicting_entry: Option<String>,
}

impl Violation {
    /// Creates a violation with no conflicting entry.
    pub fn new(kind: ViolationKind, check: CheckId, message: impl Into<String>) -> Self {
        Self {
            kind,
            check,
            message: message.into(),
            conflicting_entry: None,
        }
    }

    /// Records the conflicting entry id.
    pub fn with_conflicting_entry(mut self, id: Option<&str>) -> Self {
        self.conflicting_entry = id.map(str::to_string);
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
