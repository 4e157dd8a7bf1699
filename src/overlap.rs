//! Overlap matching.
//!
//! Given a candidate entry and a pre-scoped collection of existing entries,
//! returns the entries whose windows collide with the candidate.
//!
//! # Modes
//!
//! - [`DayMatch::Exact`]: the literal day patterns must be equal *and* the
//!   time windows overlap.
//! - [`DayMatch::Agnostic`]: only the time windows are compared. Two entries
//!   on `"MWF"` and `"TTh"` at overlapping times collide. Day strings are
//!   free text and are not trusted as a true weekday set.

use crate::models::{DayPattern, ScheduleEntry};

/// How day patterns participate in an overlap test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayMatch {
    /// Require identical literal day patterns.
    Exact,
    /// Ignore day patterns.
    Agnostic,
}

impl DayMatch {
    /// Whether two day patterns match under this mode.
    #[inline]
    pub fn days_match(&self, a: &DayPattern, b: &DayPattern) -> bool {
        match self {
            DayMatch::Exact => a.same_literal(b),
            DayMatch::Agnostic => true,
        }
    }
}

/// Whether two entries' windows overlap under `mode`.
#[inline]
pub fn entries_overlap(a: &ScheduleEntry, b: &ScheduleEntry, mode: DayMatch) -> bool {
    mode.days_match(&a.days, &b.days) && a.slot.overlaps(&b.slot)
}

/// Whether two entries share the literal day pattern and the exact window.
#[inline]
pub fn identical_window(a: &ScheduleEntry, b: &ScheduleEntry) -> bool {
    a.days.same_literal(&b.days) && a.slot.same_window(&b.slot)
}

/// All entries overlapping the candidate, in input order.
pub fn overlapping<'a>(
    candidate: &ScheduleEntry,
    entries: &'a [ScheduleEntry],
    mode: DayMatch,
) -> Vec<&'a ScheduleEntry> {
    entries
        .iter()
        .filter(|e| entries_overlap(candidate, e, mode))
        .collect()
}

/// First entry overlapping the candidate.
pub fn first_overlap<'a>(
    candidate: &ScheduleEntry,
    entries: &'a [ScheduleEntry],
    mode: DayMatch,
) -> Option<&'a ScheduleEntry> {
    entries.iter().find(|e| entries_overlap(candidate, e, mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeSlot;
    use proptest::prelude::*;

    fn entry(id: &str, days: &str, sh: u32, sm: u32, eh: u32, em: u32) -> ScheduleEntry {
        ScheduleEntry::new("T1", "MATH", "7-A")
            .with_id(id)
            .with_days(days)
            .unwrap()
            .with_slot(TimeSlot::hm(sh, sm, eh, em).unwrap())
    }

    #[test]
    fn test_day_agnostic_ignores_days() {
        let a = entry("E1", "MWF", 9, 0, 10, 0);
        let b = entry("E2", "TTh", 9, 30, 10, 30);
        assert!(entries_overlap(&a, &b, DayMatch::Agnostic));
        assert!(!entries_overlap(&a, &b, DayMatch::Exact));
    }

    #[test]
    fn test_exact_requires_literal_match() {
        let a = entry("E1", "MWF", 9, 0, 10, 0);
        let b = entry("E2", "MWF", 9, 30, 10, 30);
        let c = entry("E3", "MW", 9, 30, 10, 30); // shares days, different literal
        assert!(entries_overlap(&a, &b, DayMatch::Exact));
        assert!(!entries_overlap(&a, &c, DayMatch::Exact));
    }

    #[test]
    fn test_overlapping_subset() {
        let candidate = entry("C", "MWF", 9, 0, 10, 0);
        let existing = vec![
            entry("E1", "MWF", 8, 0, 9, 0),   // touches, no overlap
            entry("E2", "TTh", 9, 45, 11, 0), // overlaps
            entry("E3", "MWF", 9, 15, 9, 45), // overlaps
            entry("E4", "MWF", 10, 0, 11, 0), // touches
        ];

        let ids: Vec<&str> = overlapping(&candidate, &existing, DayMatch::Agnostic)
            .iter()
            .filter_map(|e| e.id.as_deref())
            .collect();
        assert_eq!(ids, vec!["E2", "E3"]);

        let exact = overlapping(&candidate, &existing, DayMatch::Exact);
        assert_eq!(exact.len(), 1);
        assert!(exact[0].has_id("E3"));

        let first = first_overlap(&candidate, &existing, DayMatch::Agnostic).unwrap();
        assert!(first.has_id("E2"));
    }

    #[test]
    fn test_identical_window() {
        let a = entry("E1", "MWF", 9, 0, 10, 0);
        assert!(identical_window(&a, &entry("E2", "MWF", 9, 0, 10, 0)));
        assert!(!identical_window(&a, &entry("E3", "MWF", 9, 0, 10, 30)));
        assert!(!identical_window(&a, &entry("E4", "TTh", 9, 0, 10, 0)));
    }

    #[test]
    fn test_no_overlap_in_empty_set() {
        let candidate = entry("C", "MWF", 9, 0, 10, 0);
        assert!(overlapping(&candidate, &[], DayMatch::Agnostic).is_empty());
        assert!(first_overlap(&candidate, &[], DayMatch::Exact).is_none());
    }

    fn arb_entry() -> impl Strategy<Value = ScheduleEntry> {
        let days = prop::sample::select(vec!["MWF", "TTh", "MW", "F"]);
        (days, 0u32..1380, 1u32..180).prop_map(|(days, start, len)| {
            let end = (start + len).min(1439);
            entry("P", days, start / 60, start % 60, end / 60, end % 60)
        })
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in arb_entry(), b in arb_entry()) {
            for mode in [DayMatch::Exact, DayMatch::Agnostic] {
                prop_assert_eq!(entries_overlap(&a, &b, mode), entries_overlap(&b, &a, mode));
            }
        }

        #[test]
        fn prop_exact_implies_agnostic(a in arb_entry(), b in arb_entry()) {
            if entries_overlap(&a, &b, DayMatch::Exact) {
                prop_assert!(entries_overlap(&a, &b, DayMatch::Agnostic));
            }
        }
    }
}
