//! Constraint checks and the validation pipeline.
//!
//! Provides the six ordered checks that decide whether a candidate entry
//! may be committed, and a pipeline that runs them and stops at the first
//! failure.
//!
//! # Usage
//!
//! ```
//! use u_timetable::constraints::{ComparisonSets, ValidationPipeline};
//! use u_timetable::models::{ScheduleEntry, TimeSlot, ViolationKind};
//! use u_timetable::ValidationPolicy;
//!
//! let pipeline = ValidationPipeline::standard(&ValidationPolicy::default());
//!
//! let existing = ScheduleEntry::new("T1", "MATH", "7-A")
//!     .with_id("E1")
//!     .with_days("MWF")
//!     .unwrap()
//!     .with_slot(TimeSlot::hm(9, 0, 10, 0).unwrap());
//! let candidate = ScheduleEntry::new("T1", "SCI", "7-B")
//!     .with_days("TTh")
//!     .unwrap()
//!     .with_slot(TimeSlot::hm(9, 30, 10, 30).unwrap());
//!
//! let sets = ComparisonSets::new().with_teacher_entries(vec![existing]);
//! let rejection = pipeline.validate(&candidate, &sets).unwrap_err();
//! assert_eq!(rejection.kind(), Some(ViolationKind::TeacherConflict));
//! ```

mod checks;
mod context;
mod pipeline;

pub use checks::{
    entries_counted_for_day, MinimumGap, SectionConflict, SubjectDuplication,
    TeacherDailyLoad, TeacherDoubleBooking, TeacherTotalLoad,
};
pub use context::ComparisonSets;
pub use pipeline::ValidationPipeline;

use crate::models::{ScheduleEntry, Violation};
use std::fmt::Debug;

/// A single constraint evaluated against a candidate entry.
///
/// Checks are pure: they read the candidate and the comparison sets and
/// return either `Ok(())` or the violation describing the first conflict
/// they find.
pub trait ConstraintCheck: Send + Sync + Debug {
    /// Check name (e.g., "teacher_total_load").
    fn name(&self) -> &'static str;

    /// Evaluates the candidate against the scoped comparison sets.
    fn check(&self, candidate: &ScheduleEntry, sets: &ComparisonSets) -> Result<(), Violation>;

    /// Check description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
