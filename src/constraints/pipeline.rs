//! Validation pipeline.
//!
//! Runs shape validation, then each constraint check in order, and returns
//! the first failure. Create and update use the same pipeline; an update
//! differs only in the comparison sets the caller supplies.

use std::sync::Arc;

use tracing::debug;

use super::checks::{
    MinimumGap, SectionConflict, SubjectDuplication, TeacherDailyLoad, TeacherDoubleBooking,
    TeacherTotalLoad,
};
use super::{ComparisonSets, ConstraintCheck};
use crate::config::ValidationPolicy;
use crate::error::Rejection;
use crate::models::ScheduleEntry;
use crate::validation::validate_entry;

/// An ordered, short-circuiting sequence of constraint checks.
///
/// Stateless once built; share it freely across threads.
///
/// # Example
/// ```
/// use u_timetable::constraints::ValidationPipeline;
/// use u_timetable::ValidationPolicy;
///
/// let pipeline = ValidationPipeline::standard(&ValidationPolicy::default());
/// assert_eq!(pipeline.check_names()[0], "teacher_total_load");
/// assert_eq!(pipeline.len(), 6);
/// ```
#[derive(Clone, Default)]
pub struct ValidationPipeline {
    checks: Vec<Arc<dyn ConstraintCheck>>,
    term_scoped: bool,
}

impl ValidationPipeline {
    /// Creates an empty pipeline (accepts every well-formed entry).
    pub fn new() -> Self {
        Self::default()
    }

    /// The six standard checks in their fixed order, configured by `policy`.
    pub fn standard(policy: &ValidationPolicy) -> Self {
        Self::new()
            .with_check(TeacherTotalLoad {
                max: policy.max_total_entries,
            })
            .with_check(TeacherDailyLoad {
                max: policy.max_daily_entries,
                scope: policy.daily_scope,
            })
            .with_check(MinimumGap {
                gap: policy.min_gap(),
                scope: policy.daily_scope,
            })
            .with_check(TeacherDoubleBooking)
            .with_check(SectionConflict)
            .with_check(SubjectDuplication)
            .with_term_scoping(policy.term_scoped)
    }

    /// Appends a check.
    pub fn with_check<C: ConstraintCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Arc::new(check));
        self
    }

    /// Compare only entries from the candidate's term.
    pub fn with_term_scoping(mut self, enabled: bool) -> Self {
        self.term_scoped = enabled;
        self
    }

    /// Check names in evaluation order.
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Number of checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether the pipeline has no checks.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Validates a candidate against its comparison sets.
    ///
    /// Returns [`Rejection::Malformed`] if the entry fails shape validation,
    /// otherwise the violation of the first failing check, otherwise `Ok`.
    /// The caller is responsible for leaving the candidate's own previous
    /// version out of `sets` on update.
    pub fn validate(
        &self,
        candidate: &ScheduleEntry,
        sets: &ComparisonSets,
    ) -> Result<(), Rejection> {
        validate_entry(candidate, sets).map_err(Rejection::Malformed)?;

        let term_sets;
        let sets = if self.term_scoped {
            term_sets = sets.within_term(&candidate.term);
            &term_sets
        } else {
            sets
        };

        for check in &self.checks {
            if let Err(violation) = check.check(candidate, sets) {
                debug!(
                    check = check.name(),
                    teacher = %candidate.teacher_id,
                    section = %candidate.section_id,
                    conflicting = ?violation.conflicting_entry,
                    "constraint check failed"
                );
                return Err(Rejection::Violation(violation));
            }
            debug!(check = check.name(), "constraint check passed");
        }

        Ok(())
    }
}

impl std::fmt::Debug for ValidationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationPipeline")
            .field("checks", &self.check_names())
            .field("term_scoped", &self.term_scoped)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DailyScope;
    use crate::models::{CheckId, TermContext, TimeSlot, Timetable, ViolationKind};

    fn entry(
        teacher: &str,
        subject: &str,
        section: &str,
        days: &str,
        (sh, sm, eh, em): (u32, u32, u32, u32),
    ) -> ScheduleEntry {
        ScheduleEntry::new(teacher, subject, section)
            .with_days(days)
            .unwrap()
            .with_slot(TimeSlot::hm(sh, sm, eh, em).unwrap())
    }

    fn pipeline() -> ValidationPipeline {
        ValidationPipeline::standard(&ValidationPolicy::default())
    }

    /// Validates against the timetable and commits on success.
    fn submit(timetable: &mut Timetable, candidate: ScheduleEntry) -> Result<(), Rejection> {
        let sets = ComparisonSets::from_timetable(&candidate, timetable);
        pipeline().validate(&candidate, &sets)?;
        let id = format!("E{}", timetable.len() + 1);
        timetable.add_entry(candidate.with_id(id));
        Ok(())
    }

    #[test]
    fn test_standard_order() {
        assert_eq!(
            pipeline().check_names(),
            vec![
                "teacher_total_load",
                "teacher_daily_load",
                "minimum_gap",
                "teacher_double_booking",
                "section_conflict",
                "subject_duplication",
            ]
        );
    }

    #[test]
    fn test_scenario_math_7a() {
        let mut tt = Timetable::new();

        // T1 has no entries: accepted.
        submit(&mut tt, entry("T1", "MATH", "7-A", "MWF", (9, 0, 10, 0))).unwrap();

        // Same teacher on TTh, overlapping time: teacher conflict.
        let r = submit(&mut tt, entry("T1", "SCI", "7-B", "TTh", (9, 30, 10, 15))).unwrap_err();
        assert_eq!(r.kind(), Some(ViolationKind::TeacherConflict));

        // Another teacher takes 7-A at the identical slot: section conflict.
        let r = submit(&mut tt, entry("T2", "ENG", "7-A", "MWF", (9, 0, 10, 0))).unwrap_err();
        assert_eq!(r.kind(), Some(ViolationKind::SectionConflict));
        assert!(r.to_string().contains("cannot have two teachers"));

        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn test_update_unchanged_has_no_self_conflict() {
        let mut tt = Timetable::new();
        submit(&mut tt, entry("T1", "MATH", "7-A", "MWF", (9, 0, 10, 0))).unwrap();
        submit(&mut tt, entry("T1", "SCI", "7-B", "MWF", (13, 0, 14, 0))).unwrap();

        for existing in tt.entries.clone() {
            let sets = ComparisonSets::from_timetable(&existing, &tt);
            assert!(pipeline().validate(&existing, &sets).is_ok());
        }
    }

    #[test]
    fn test_update_without_self_exclusion_is_malformed() {
        let existing = entry("T1", "MATH", "7-A", "MWF", (9, 0, 10, 0)).with_id("E1");
        let sets = ComparisonSets::new().with_teacher_entries(vec![existing.clone()]);
        let r = pipeline().validate(&existing, &sets).unwrap_err();
        assert!(r.is_malformed());
    }

    #[test]
    fn test_teacher_ceiling_independent_of_time() {
        let full: Vec<ScheduleEntry> = (0..30)
            .map(|i| entry("T1", "ART", "9-Z", "Su", (6, 0, 6, 30)).with_id(format!("F{i}")))
            .collect();
        let sets = ComparisonSets::new().with_teacher_entries(full);

        for (days, window) in [("MWF", (9, 0, 10, 0)), ("TTh", (15, 0, 16, 0))] {
            let r = pipeline()
                .validate(&entry("T1", "MATH", "7-A", days, window), &sets)
                .unwrap_err();
            let v = r.violation().unwrap();
            assert_eq!(v.kind, ViolationKind::Capacity);
            assert_eq!(v.check, CheckId::TeacherTotalLoad);
        }
    }

    #[test]
    fn test_daily_ceiling_fires_before_total() {
        let eight: Vec<ScheduleEntry> = (0..8)
            .map(|i| entry("T1", "ART", "9-Z", "Su", (6, 0, 6, 30)).with_id(format!("F{i}")))
            .collect();
        let sets = ComparisonSets::new().with_teacher_entries(eight);
        let r = pipeline()
            .validate(&entry("T1", "MATH", "7-A", "MWF", (9, 0, 10, 0)), &sets)
            .unwrap_err();
        assert_eq!(r.violation().unwrap().check, CheckId::TeacherDailyLoad);
    }

    #[test]
    fn test_gap_enforcement() {
        let mut tt = Timetable::new();
        submit(&mut tt, entry("T1", "MATH", "7-A", "MWF", (9, 0, 10, 0))).unwrap();

        let r = submit(&mut tt, entry("T1", "SCI", "7-B", "MWF", (10, 14, 11, 0))).unwrap_err();
        assert_eq!(r.kind(), Some(ViolationKind::Gap));

        submit(&mut tt, entry("T1", "SCI", "7-B", "MWF", (10, 15, 11, 0))).unwrap();
    }

    #[test]
    fn test_section_exclusivity_same_teacher_is_not_section_conflict() {
        let mut tt = Timetable::new();
        submit(&mut tt, entry("T1", "MATH", "7-A", "MWF", (9, 0, 10, 0))).unwrap();

        // Same teacher, same section, same slot: the teacher's own booking
        // rejects it, never the section check.
        let r = submit(&mut tt, entry("T1", "MATH", "7-A", "MWF", (9, 0, 10, 0))).unwrap_err();
        assert_ne!(r.kind(), Some(ViolationKind::SectionConflict));
        assert_eq!(r.kind(), Some(ViolationKind::TeacherConflict));
    }

    #[test]
    fn test_subject_duplication_time_independent() {
        let mut tt = Timetable::new();
        submit(&mut tt, entry("T1", "MATH", "7-A", "MWF", (9, 0, 10, 0))).unwrap();

        let r = submit(&mut tt, entry("T2", "MATH", "7-A", "MWF", (13, 0, 14, 0))).unwrap_err();
        assert_eq!(r.kind(), Some(ViolationKind::DuplicateSubject));

        // Different literal days: allowed.
        submit(&mut tt, entry("T2", "MATH", "7-A", "TTh", (13, 0, 14, 0))).unwrap();
    }

    #[test]
    fn test_malformed_runs_no_checks() {
        let full: Vec<ScheduleEntry> = (0..30)
            .map(|i| entry("T1", "ART", "9-Z", "Su", (6, 0, 6, 30)).with_id(format!("F{i}")))
            .collect();
        let sets = ComparisonSets::new().with_teacher_entries(full);
        let r = pipeline()
            .validate(&entry("T1", "MATH", "7-A", "MWF", (10, 0, 9, 0)), &sets)
            .unwrap_err();
        assert!(r.is_malformed());
    }

    #[test]
    fn test_term_scoping() {
        let q1 = TermContext::new("2024-2025", 1);
        let q2 = TermContext::new("2024-2025", 2);
        let existing = entry("T1", "MATH", "7-A", "MWF", (9, 0, 10, 0))
            .with_id("E1")
            .with_term(q1);
        let candidate = entry("T1", "SCI", "7-B", "MWF", (9, 0, 10, 0)).with_term(q2);
        let sets = ComparisonSets::new().with_teacher_entries(vec![existing]);

        // Terms are not a conflict dimension by default.
        assert!(pipeline().validate(&candidate, &sets).is_err());

        let policy = ValidationPolicy::default().with_term_scoped(true);
        assert!(ValidationPipeline::standard(&policy)
            .validate(&candidate, &sets)
            .is_ok());
    }

    #[test]
    fn test_shared_weekday_scope() {
        let eight: Vec<ScheduleEntry> = (0..8)
            .map(|i| entry("T1", "ART", "9-Z", "Su", (6, 0, 6, 30)).with_id(format!("F{i}")))
            .collect();
        let sets = ComparisonSets::new().with_teacher_entries(eight);
        let policy = ValidationPolicy::default().with_daily_scope(DailyScope::SharedWeekday);

        assert!(ValidationPipeline::standard(&policy)
            .validate(&entry("T1", "MATH", "7-A", "MWF", (9, 0, 10, 0)), &sets)
            .is_ok());
    }

    #[test]
    fn test_custom_pipeline() {
        let p = ValidationPipeline::new().with_check(SubjectDuplication);
        assert_eq!(p.len(), 1);
        let existing = entry("T1", "MATH", "7-A", "MWF", (9, 0, 10, 0)).with_id("E1");
        let sets = ComparisonSets::new().with_teacher_entries(vec![existing]);
        // No teacher checks configured: overlap passes.
        assert!(p
            .validate(&entry("T1", "SCI", "7-B", "MWF", (9, 0, 10, 0)), &sets)
            .is_ok());
        assert!(ValidationPipeline::new().is_empty());
    }
}
