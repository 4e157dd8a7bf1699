//! Read-validate-write around the constraint pipeline.
//!
//! The pipeline itself is pure. Committing an entry safely also needs the
//! comparison sets to stay valid until the write lands: two submissions for
//! the same teacher or section must not both validate against the same
//! snapshot and then both commit. This module makes that boundary explicit
//! and injectable:
//!
//! - [`ConsistencyBoundary`]: serializes work per contended key
//!   ([`KeyedLocks`] for in-process stores, [`Unguarded`] when the store
//!   already serializes, e.g. a serializable transaction)
//! - [`ScheduleRepository`]: where comparison sets come from and where
//!   entries are written ([`InMemoryRepository`] as a reference)
//! - [`TimetableService`]: create / update / delete as single units of work
//!
//! # Usage
//!
//! ```
//! use u_timetable::commit::{InMemoryRepository, KeyedLocks, TimetableService};
//! use u_timetable::models::{ScheduleEntry, TimeSlot};
//! use u_timetable::ValidationPolicy;
//!
//! let service = TimetableService::new(
//!     InMemoryRepository::new(),
//!     KeyedLocks::new(),
//!     &ValidationPolicy::default(),
//! );
//!
//! let entry = ScheduleEntry::new("T1", "MATH", "7-A")
//!     .with_days("MWF")
//!     .unwrap()
//!     .with_slot(TimeSlot::hm(9, 0, 10, 0).unwrap());
//! let saved = service.create(entry).unwrap();
//! assert!(saved.id.is_some());
//! ```

mod boundary;
mod repository;
mod service;

pub use boundary::{ConsistencyBoundary, KeyedLocks, LockKey, Unguarded};
pub use repository::{InMemoryRepository, ScheduleRepository, StoreError};
pub use service::{CommitError, TimetableService};
