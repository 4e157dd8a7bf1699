//! Built-in constraint checks.
//!
//! # Order
//!
//! The standard pipeline runs these in a fixed order and stops at the
//! first failure:
//!
//! 1. [`TeacherTotalLoad`]: total entries per teacher
//! 2. [`TeacherDailyLoad`]: entries per teacher per day
//! 3. [`MinimumGap`]: spacing between a teacher's classes
//! 4. [`TeacherDoubleBooking`]: teacher teaching two classes at once
//! 5. [`SectionConflict`]: section taught by two teachers at once
//! 6. [`SubjectDuplication`]: subject repeated in a section's day
//!
//! Each check trusts the comparison sets to be scoped by the caller.

use chrono::Duration;

use super::{ComparisonSets, ConstraintCheck};
use crate::config::DailyScope;
use crate::models::{CheckId, ScheduleEntry, Violation, ViolationKind};
use crate::overlap::{entries_overlap, first_overlap, identical_window, DayMatch};

/// Teacher entries counted as "on the candidate's day".
///
/// With [`DailyScope::AllEntries`] nothing is filtered: every entry of the
/// teacher counts, whatever its days. This keeps the established behaviour
/// where the daily ceiling and the gap check see the full teacher set.
/// [`DailyScope::SharedWeekday`] keeps only entries sharing a weekday with
/// the candidate.
pub fn entries_counted_for_day<'a>(
    candidate: &ScheduleEntry,
    teacher_entries: &'a [ScheduleEntry],
    scope: DailyScope,
) -> Vec<&'a ScheduleEntry> {
    match scope {
        DailyScope::AllEntries => teacher_entries.iter().collect(),
        DailyScope::SharedWeekday => teacher_entries
            .iter()
            .filter(|e| e.days.shares_weekday(&candidate.days))
            .collect(),
    }
}

// ======================== Capacity ========================

/// Rejects when the teacher already holds `max` entries.
#[derive(Debug, Clone, Copy)]
pub struct TeacherTotalLoad {
    pub max: usize,
}

impl ConstraintCheck for TeacherTotalLoad {
    fn name(&self) -> &'static str {
        CheckId::TeacherTotalLoad.as_str()
    }

    fn check(&self, candidate: &ScheduleEntry, sets: &ComparisonSets) -> Result<(), Violation> {
        let load = sets.teacher_entries.len();
        if load >= self.max {
            return Err(Violation::new(
                ViolationKind::Capacity,
                CheckId::TeacherTotalLoad,
                format!(
                    "{} already has {} scheduled classes (maximum {})",
                    candidate.teacher_name(),
                    load,
                    self.max
                ),
            ));
        }
        Ok(())
    }

    fn description(&self) -> &'static str {
        "Teacher total load ceiling"
    }
}

/// Rejects when the teacher's entries for the day reach `max`.
///
/// Which entries count is decided by [`entries_counted_for_day`].
#[derive(Debug, Clone, Copy)]
pub struct TeacherDailyLoad {
    pub max: usize,
    pub scope: DailyScope,
}

impl ConstraintCheck for TeacherDailyLoad {
    fn name(&self) -> &'static str {
        CheckId::TeacherDailyLoad.as_str()
    }

    fn check(&self, candidate: &ScheduleEntry, sets: &ComparisonSets) -> Result<(), Violation> {
        let load = entries_counted_for_day(candidate, &sets.teacher_entries, self.scope).len();
        if load >= self.max {
            return Err(Violation::new(
                ViolationKind::Capacity,
                CheckId::TeacherDailyLoad,
                format!(
                    "{} already has {} classes for {} (maximum {} per day)",
                    candidate.teacher_name(),
                    load,
                    candidate.days,
                    self.max
                ),
            ));
        }
        Ok(())
    }

    fn description(&self) -> &'static str {
        "Teacher per-day ceiling"
    }
}

// ======================== Spacing ========================

/// Rejects when another class of the teacher ends less than `gap` before
/// the candidate starts, or starts less than `gap` after it ends.
///
/// Entries that truly overlap the candidate are skipped here and reported
/// by [`TeacherDoubleBooking`].
#[derive(Debug, Clone, Copy)]
pub struct MinimumGap {
    pub gap: Duration,
    pub scope: DailyScope,
}

impl ConstraintCheck for MinimumGap {
    fn name(&self) -> &'static str {
        CheckId::MinimumGap.as_str()
    }

    fn check(&self, candidate: &ScheduleEntry, sets: &ComparisonSets) -> Result<(), Violation> {
        let too_close = entries_counted_for_day(candidate, &sets.teacher_entries, self.scope)
            .into_iter()
            .find(|e| {
                !candidate.slot.overlaps(&e.slot) && candidate.slot.within_gap(&e.slot, self.gap)
            });

        match too_close {
            Some(existing) => Err(Violation::new(
                ViolationKind::Gap,
                CheckId::MinimumGap,
                format!(
                    "{} needs at least {} minutes between classes: {} ({}) is scheduled {}",
                    candidate.teacher_name(),
                    self.gap.num_minutes(),
                    existing.subject_name(),
                    existing.section_name(),
                    existing.when()
                ),
            )
            .with_conflicting_entry(existing.id.as_deref())),
            None => Ok(()),
        }
    }

    fn description(&self) -> &'static str {
        "Minimum gap between a teacher's classes"
    }
}

// ======================== Double booking ========================

/// Rejects when the teacher already teaches at an overlapping time, on any
/// day pattern.
#[derive(Debug, Clone, Copy)]
pub struct TeacherDoubleBooking;

impl ConstraintCheck for TeacherDoubleBooking {
    fn name(&self) -> &'static str {
        CheckId::TeacherDoubleBooking.as_str()
    }

    fn check(&self, candidate: &ScheduleEntry, sets: &ComparisonSets) -> Result<(), Violation> {
        match first_overlap(candidate, &sets.teacher_entries, DayMatch::Agnostic) {
            Some(existing) => Err(Violation::new(
                ViolationKind::TeacherConflict,
                CheckId::TeacherDoubleBooking,
                format!(
                    "{} is already teaching {} ({}) on {}",
                    existing.teacher_name(),
                    existing.subject_name(),
                    existing.section_name(),
                    existing.when()
                ),
            )
            .with_conflicting_entry(existing.id.as_deref())),
            None => Ok(()),
        }
    }

    fn description(&self) -> &'static str {
        "Teacher double-booking"
    }
}

/// Rejects when the section already has a different teacher at the
/// candidate's time.
///
/// Two sub-checks, in order:
/// 1. Same literal day pattern and identical window.
/// 2. Any overlapping window, whatever the day pattern.
#[derive(Debug, Clone, Copy)]
pub struct SectionConflict;

impl ConstraintCheck for SectionConflict {
    fn name(&self) -> &'static str {
        CheckId::SectionConflict.as_str()
    }

    fn check(&self, candidate: &ScheduleEntry, sets: &ComparisonSets) -> Result<(), Violation> {
        if let Some(existing) = other_teachers(candidate, &sets.section_entries)
            .find(|e| identical_window(candidate, e))
        {
            return Err(Violation::new(
                ViolationKind::SectionConflict,
                CheckId::SectionConflict,
                format!(
                    "{} already has {} teaching {} on {}; a section cannot have two teachers at once",
                    existing.section_name(),
                    existing.teacher_name(),
                    existing.subject_name(),
                    existing.when()
                ),
            )
            .with_conflicting_entry(existing.id.as_deref()));
        }

        if let Some(existing) = other_teachers(candidate, &sets.section_entries)
            .find(|e| entries_overlap(candidate, e, DayMatch::Agnostic))
        {
            return Err(Violation::new(
                ViolationKind::SectionConflict,
                CheckId::SectionConflict,
                format!(
                    "{} is already taken by {} ({}) on {}",
                    existing.section_name(),
                    existing.teacher_name(),
                    existing.subject_name(),
                    existing.when()
                ),
            )
            .with_conflicting_entry(existing.id.as_deref()));
        }

        Ok(())
    }

    fn description(&self) -> &'static str {
        "Section taught by two teachers"
    }
}

/// Section entries taught by someone other than the candidate's teacher.
fn other_teachers<'a>(
    candidate: &'a ScheduleEntry,
    section_entries: &'a [ScheduleEntry],
) -> impl Iterator<Item = &'a ScheduleEntry> + 'a {
    section_entries
        .iter()
        .filter(move |e| e.teacher_id != candidate.teacher_id)
}

// ======================== Duplication ========================

/// Rejects when the subject is already scheduled for the section on the
/// same literal day pattern, at any time.
///
/// Only entries matching the candidate's subject, section and literal days
/// count, whatever else the caller put in the set.
#[derive(Debug, Clone, Copy)]
pub struct SubjectDuplication;

impl ConstraintCheck for SubjectDuplication {
    fn name(&self) -> &'static str {
        CheckId::SubjectDuplication.as_str()
    }

    fn check(&self, candidate: &ScheduleEntry, sets: &ComparisonSets) -> Result<(), Violation> {
        let duplicate = sets.subject_section_day.iter().find(|e| {
            e.subject_id == candidate.subject_id
                && e.section_id == candidate.section_id
                && e.days.same_literal(&candidate.days)
        });

        match duplicate {
            Some(existing) => Err(Violation::new(
                ViolationKind::DuplicateSubject,
                CheckId::SubjectDuplication,
                format!(
                    "{} is already scheduled for {} on {} ({})",
                    existing.subject_name(),
                    existing.section_name(),
                    candidate.days,
                    existing.slot
                ),
            )
            .with_conflicting_entry(existing.id.as_deref())),
            None => Ok(()),
        }
    }

    fn description(&self) -> &'static str {
        "Subject repeated in a section's day"
    }
}
