//! Schedule entry model.
//!
//! An entry books one teacher to teach one subject to one section on a
//! weekday pattern during a time-of-day slot. It is the unit validated by
//! the constraint pipeline and the unit persisted by the caller.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DayPattern, DayPatternError, TimeSlot};

/// School year + quarter tag.
///
/// Not a conflict dimension unless the policy enables term scoping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TermContext {
    /// School year label (e.g. "2024-2025").
    pub school_year: String,
    /// Quarter within the year (1-based; 0 = unspecified).
    pub quarter: u8,
}

impl TermContext {
    /// Creates a term tag.
    pub fn new(school_year: impl Into<String>, quarter: u8) -> Self {
        Self {
            school_year: school_year.into(),
            quarter,
        }
    }
}

impl fmt::Display for TermContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Q{}", self.school_year, self.quarter)
    }
}

/// Caller-supplied display names used in violation messages.
///
/// The engine never resolves ids to names. Empty labels fall back to ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryLabels {
    pub teacher: String,
    pub subject: String,
    pub section: String,
}

/// One teacher+subject+section+days+slot booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Entry identifier. `None` for entries not yet created.
    pub id: Option<String>,
    /// Teacher token.
    pub teacher_id: String,
    /// Subject token.
    pub subject_id: String,
    /// Section token.
    pub section_id: String,
    /// Display names for messages.
    #[serde(default)]
    pub labels: EntryLabels,
    /// Weekday pattern.
    pub days: DayPattern,
    /// Time-of-day window.
    pub slot: TimeSlot,
    /// Term tag.
    #[serde(default)]
    pub term: TermContext,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl ScheduleEntry {
    /// Creates a new, unsaved entry with an empty day pattern and a
    /// midnight-to-midnight slot. Set both before validating.
    pub fn new(
        teacher_id: impl Into<String>,
        subject_id: impl Into<String>,
        section_id: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            teacher_id: teacher_id.into(),
            subject_id: subject_id.into(),
            section_id: section_id.into(),
            labels: EntryLabels::default(),
            days: DayPattern::default(),
            slot: TimeSlot::new(NaiveTime::MIN, NaiveTime::MIN),
            term: TermContext::default(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Sets the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Parses and sets the day pattern.
    pub fn with_days(mut self, days: &str) -> Result<Self, DayPatternError> {
        self.days = DayPattern::parse(days)?;
        Ok(self)
    }

    /// Sets the time slot.
    pub fn with_slot(mut self, slot: TimeSlot) -> Self {
        self.slot = slot;
        self
    }

    /// Sets the term tag.
    pub fn with_term(mut self, term: TermContext) -> Self {
        self.term = term;
        self
    }

    /// Sets display names.
    pub fn with_labels(
        mut self,
        teacher: impl Into<String>,
        subject: impl Into<String>,
        section: impl Into<String>,
    ) -> Self {
        self.labels = EntryLabels {
            teacher: teacher.into(),
            subject: subject.into(),
            section: section.into(),
        };
        self
    }

    /// Teacher display name, or the teacher id.
    pub fn teacher_name(&self) -> &str {
        label_or(&self.labels.teacher, &self.teacher_id)
    }

    /// Subject display name, or the subject id.
    pub fn subject_name(&self) -> &str {
        label_or(&self.labels.subject, &self.subject_id)
    }

    /// Section display name, or the section id.
    pub fn section_name(&self) -> &str {
        label_or(&self.labels.section, &self.section_id)
    }

    /// Whether this entry has the given id.
    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    /// `"MWF 9:00 AM - 10:00 AM"`.
    pub fn when(&self) -> String {
        format!("{} {}", self.days, self.slot)
    }
}

fn label_or<'a>(label: &'a str, id: &'a str) -> &'a str {
    if label.is_empty() {
        id
    } else {
        label
    }
}
