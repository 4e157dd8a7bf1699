//! Timetable conflict detection for the U-Engine ecosystem.
//!
//! Decides whether a proposed teacher/subject/section time-slot assignment
//! may be committed. The engine is pure: it receives a candidate entry plus
//! caller-scoped snapshots of existing entries and returns either acceptance
//! or exactly one typed rejection.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ScheduleEntry`, `DayPattern`, `TimeSlot`,
//!   `TermContext`, `Timetable`, `Violation`
//! - **`overlap`**: Day-exact and day-agnostic overlap matching
//! - **`constraints`**: The six ordered checks and the `ValidationPipeline`
//! - **`validation`**: Shape checks run before any constraint
//! - **`config`**: `ValidationPolicy` limits and scoping switches
//! - **`commit`**: Read-validate-write service behind an injectable
//!   consistency boundary
//!
//! # Example
//!
//! ```
//! use u_timetable::constraints::{ComparisonSets, ValidationPipeline};
//! use u_timetable::models::{ScheduleEntry, TimeSlot};
//! use u_timetable::ValidationPolicy;
//!
//! let policy = ValidationPolicy::default();
//! let pipeline = ValidationPipeline::standard(&policy);
//!
//! let candidate = ScheduleEntry::new("T1", "MATH", "7-A")
//!     .with_days("MWF")
//!     .unwrap()
//!     .with_slot(TimeSlot::hm(9, 0, 10, 0).unwrap());
//!
//! assert!(pipeline.validate(&candidate, &ComparisonSets::default()).is_ok());
//! ```

pub mod commit;
pub mod config;
pub mod constraints;
pub mod error;
pub mod models;
pub mod overlap;
pub mod validation;

pub use config::{ConfigError, DailyScope, ValidationPolicy};
pub use error::Rejection;
