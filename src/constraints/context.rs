//! Comparison sets handed to the constraint checks.

use serde::{Deserialize, Serialize};

use crate::models::{ScheduleEntry, TermContext, Timetable};

/// Pre-scoped snapshots of existing entries.
///
/// The caller fetches each set (by teacher, by section, by subject +
/// section + day pattern). On update the caller must leave the entry's own
/// previous version out of every set; [`from_timetable`](Self::from_timetable)
/// does this for in-memory snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonSets {
    /// Other entries of the candidate's teacher.
    pub teacher_entries: Vec<ScheduleEntry>,
    /// Other entries of the candidate's section.
    pub section_entries: Vec<ScheduleEntry>,
    /// Entries sharing subject, section, and literal day pattern.
    pub subject_section_day: Vec<ScheduleEntry>,
}

impl ComparisonSets {
    /// Creates empty sets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the teacher entries.
    pub fn with_teacher_entries(mut self, entries: Vec<ScheduleEntry>) -> Self {
        self.teacher_entries = entries;
        self
    }

    /// Sets the section entries.
    pub fn with_section_entries(mut self, entries: Vec<ScheduleEntry>) -> Self {
        self.section_entries = entries;
        self
    }

    /// Sets the subject + section + day entries.
    pub fn with_subject_section_day(mut self, entries: Vec<ScheduleEntry>) -> Self {
        self.subject_section_day = entries;
        self
    }

    /// Scopes a timetable snapshot for `candidate`.
    ///
    /// Every set excludes the entry whose id equals the candidate's id.
    pub fn from_timetable(candidate: &ScheduleEntry, timetable: &Timetable) -> Self {
        let others = |entries: Vec<&ScheduleEntry>| -> Vec<ScheduleEntry> {
            entries
                .into_iter()
                .filter(|e| match candidate.id.as_deref() {
                    Some(id) => !e.has_id(id),
                    None => true,
                })
                .cloned()
                .collect()
        };

        Self {
            teacher_entries: others(timetable.entries_for_teacher(&candidate.teacher_id)),
            section_entries: others(timetable.entries_for_section(&candidate.section_id)),
            subject_section_day: others(timetable.entries_for_subject_section_days(
                &candidate.subject_id,
                &candidate.section_id,
                &candidate.days,
            )),
        }
    }

    /// Copy of the sets restricted to entries tagged with `term`.
    pub fn within_term(&self, term: &TermContext) -> Self {
        let keep = |entries: &[ScheduleEntry]| -> Vec<ScheduleEntry> {
            entries.iter().filter(|e| &e.term == term).cloned().collect()
        };

        Self {
            teacher_entries: keep(&self.teacher_entries),
            section_entries: keep(&self.section_entries),
            subject_section_day: keep(&self.subject_section_day),
        }
    }

    /// The three sets with their names, for diagnostics.
    pub fn named_sets(&self) -> [(&'static str, &[ScheduleEntry]); 3] {
        [
            ("teacher", self.teacher_entries.as_slice()),
            ("section", self.section_entries.as_slice()),
            ("subject-section-day", self.subject_section_day.as_slice()),
        ]
    }

    /// Total number of entries across the three sets.
    pub fn len(&self) -> usize {
        self.teacher_entries.len() + self.section_entries.len() + self.subject_section_day.len()
    }

    /// Whether all three sets are empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
