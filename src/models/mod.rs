//! Timetable domain models.
//!
//! Provides the data types the conflict engine reasons about. Identifiers
//! are opaque tokens compared for equality only; display names are supplied
//! by the caller and never resolved here.
//!
//! # Domain Mappings
//!
//! | u-timetable | School | Training Center | Clinic |
//! |-------------|--------|-----------------|--------|
//! | Teacher | Faculty member | Instructor | Practitioner |
//! | Subject | Course | Module | Service |
//! | Section | Class group | Cohort | Room block |
//! | ScheduleEntry | Class meeting | Session | Appointment slot |

mod days;
mod entry;
mod time_slot;
mod timetable;
mod violation;

pub use days::{DayPattern, DayPatternError, WeekdaySet};
pub use entry::{EntryLabels, ScheduleEntry, TermContext};
pub use time_slot::{TimeSlot, TimeSlotError};
pub use timetable::Timetable;
pub use violation::{CheckId, Violation, ViolationKind};
