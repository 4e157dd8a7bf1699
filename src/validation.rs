//! Shape validation for schedule entries.
//!
//! Checks structural integrity of a candidate before any constraint check
//! runs, so malformed input never produces nonsensical overlap results.
//! Detects:
//! - Missing teacher, subject, or section references
//! - Inverted or empty time slots (`start >= end`)
//! - Empty day patterns
//! - A candidate whose own id is still present in a comparison set
//!
//! All problems are reported together.

use crate::constraints::ComparisonSets;
use crate::models::ScheduleEntry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ShapeError>>;

/// A shape error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeError {
    /// Error category.
    pub kind: ShapeErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of shape errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeErrorKind {
    /// Teacher, subject, or section id is blank.
    MissingReference,
    /// `start >= end`.
    InvertedSlot,
    /// Day pattern names no weekday.
    EmptyDays,
    /// The candidate's own id appears in a comparison set.
    SelfNotExcluded,
}

impl ShapeError {
    fn new(kind: ShapeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates the shape of a candidate entry against its comparison sets.
///
/// Checks:
/// 1. Teacher, subject, and section ids are non-blank
/// 2. The slot starts before it ends
/// 3. The day pattern names at least one weekday
/// 4. On update, no comparison set still contains the candidate's id
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_entry(candidate: &ScheduleEntry, sets: &ComparisonSets) -> ValidationResult {
    let mut errors = Vec::new();

    for (field, value) in [
        ("teacher", &candidate.teacher_id),
        ("subject", &candidate.subject_id),
        ("section", &candidate.section_id),
    ] {
        if value.trim().is_empty() {
            errors.push(ShapeError::new(
                ShapeErrorKind::MissingReference,
                format!("Entry has no {field} reference"),
            ));
        }
    }

    if !candidate.slot.is_well_formed() {
        errors.push(ShapeError::new(
            ShapeErrorKind::InvertedSlot,
            format!(
                "Start time {} must be before end time {}",
                candidate.slot.start.format("%H:%M"),
                candidate.slot.end.format("%H:%M")
            ),
        ));
    }

    if candidate.days.is_empty() {
        errors.push(ShapeError::new(
            ShapeErrorKind::EmptyDays,
            format!("Day pattern {:?} names no weekday", candidate.days.as_str()),
        ));
    }

    if let Some(id) = candidate.id.as_deref() {
        for (name, set) in sets.named_sets() {
            if set.iter().any(|e| e.has_id(id)) {
                errors.push(ShapeError::new(
                    ShapeErrorKind::SelfNotExcluded,
                    format!("Entry '{id}' is still present in the {name} comparison set"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeSlot;

    fn valid_entry() -> ScheduleEntry {
        ScheduleEntry::new("T1", "MATH", "7-A")
            .with_days("MWF")
            .unwrap()
            .with_slot(TimeSlot::hm(9, 0, 10, 0).unwrap())
    }

    #[test]
    fn test_valid_entry() {
        assert!(validate_entry(&valid_entry(), &ComparisonSets::default()).is_ok());
    }

    #[test]
    fn test_inverted_slot() {
        let e = valid_entry().with_slot(TimeSlot::hm(10, 0, 9, 0).unwrap());
        let errors = validate_entry(&e, &ComparisonSets::default()).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ShapeErrorKind::InvertedSlot));
    }

    #[test]
    fn test_zero_length_slot() {
        let e = valid_entry().with_slot(TimeSlot::hm(9, 0, 9, 0).unwrap());
        let errors = validate_entry(&e, &ComparisonSets::default()).unwrap_err();
        assert_eq!(errors[0].kind, ShapeErrorKind::InvertedSlot);
        assert!(errors[0].message.contains("09:00"));
    }

    #[test]
    fn test_empty_days() {
        let e = valid_entry().with_days("").unwrap();
        let errors = validate_entry(&e, &ComparisonSets::default()).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ShapeErrorKind::EmptyDays));
    }

    #[test]
    fn test_missing_reference() {
        let e = ScheduleEntry {
            section_id: " ".into(),
            ..valid_entry()
        };
        let errors = validate_entry(&e, &ComparisonSets::default()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("section"));
    }

    #[test]
    fn test_self_not_excluded() {
        let e = valid_entry().with_id("E1");
        let sets = ComparisonSets::new().with_teacher_entries(vec![e.clone()]);
        let errors = validate_entry(&e, &sets).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ShapeErrorKind::SelfNotExcluded);
        assert!(errors[0].message.contains("teacher"));
    }

    #[test]
    fn test_multiple_errors() {
        let e = ScheduleEntry::new("", "MATH", "7-A"); // no teacher, no days, empty slot
        let errors = validate_entry(&e, &ComparisonSets::default()).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
