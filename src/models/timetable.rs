//! Timetable (entry collection) model.
//!
//! An in-memory snapshot of committed schedule entries with the scoped
//! queries the constraint pipeline needs: by teacher, by section, and by
//! subject + section + day pattern.

use serde::{Deserialize, Serialize};

use super::{DayPattern, ScheduleEntry};

/// A collection of committed schedule entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timetable {
    /// Committed entries, in insertion order.
    pub entries: Vec<ScheduleEntry>,
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry.
    pub fn add_entry(&mut self, entry: ScheduleEntry) {
        self.entries.push(entry);
    }

    /// Builder: adds an entry and returns self.
    pub fn with_entry(mut self, entry: ScheduleEntry) -> Self {
        self.add_entry(entry);
        self
    }

    /// Finds an entry by id.
    pub fn entry(&self, id: &str) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.has_id(id))
    }

    /// Replaces the entry with the given id. Returns the previous entry.
    pub fn replace_entry(&mut self, id: &str, entry: ScheduleEntry) -> Option<ScheduleEntry> {
        let slot = self.entries.iter_mut().find(|e| e.has_id(id))?;
        Some(std::mem::replace(slot, entry))
    }

    /// Removes the entry with the given id.
    pub fn remove_entry(&mut self, id: &str) -> Option<ScheduleEntry> {
        let pos = self.entries.iter().position(|e| e.has_id(id))?;
        Some(self.entries.remove(pos))
    }

    /// All entries for a teacher.
    pub fn entries_for_teacher(&self, teacher_id: &str) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.teacher_id == teacher_id)
            .collect()
    }

    /// All entries for a section.
    pub fn entries_for_section(&self, section_id: &str) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.section_id == section_id)
            .collect()
    }

    /// Entries sharing subject, section, and literal day pattern.
    pub fn entries_for_subject_section_days(
        &self,
        subject_id: &str,
        section_id: &str,
        days: &DayPattern,
    ) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| {
                e.subject_id == subject_id && e.section_id == section_id && e.days.same_literal(days)
            })
            .collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the timetable is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
