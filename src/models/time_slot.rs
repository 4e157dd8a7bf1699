//! Time-of-day windows.
//!
//! # Time Model
//! Entries repeat weekly, so a slot is a pair of wall-clock times with no
//! date component. Stores that persist full date-times should construct
//! slots with [`TimeSlot::from_datetimes`], which discards the dates.
//!
//! All arithmetic is done in seconds since midnight; nothing wraps around
//! midnight.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors from building a time slot out of raw clock values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeSlotError {
    /// Hour or minute out of range.
    #[error("invalid clock time {hour:02}:{minute:02}")]
    InvalidTime { hour: u32, minute: u32 },
}

/// A time-of-day interval [start, end).
///
/// Half-open interval: includes start, excludes end. `start < end` is
/// expected but not enforced here; shape validation rejects inverted slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Slot start (inclusive).
    pub start: NaiveTime,
    /// Slot end (exclusive).
    pub end: NaiveTime,
}

fn clock(hour: u32, minute: u32) -> Result<NaiveTime, TimeSlotError> {
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or(TimeSlotError::InvalidTime { hour, minute })
}

#[inline]
fn seconds(t: NaiveTime) -> i64 {
    i64::from(t.num_seconds_from_midnight())
}

impl TimeSlot {
    /// Creates a new slot.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Creates a slot from hour/minute pairs.
    pub fn hm(
        start_hour: u32,
        start_minute: u32,
        end_hour: u32,
        end_minute: u32,
    ) -> Result<Self, TimeSlotError> {
        Ok(Self::new(
            clock(start_hour, start_minute)?,
            clock(end_hour, end_minute)?,
        ))
    }

    /// Creates a slot from full date-times, ignoring their dates.
    pub fn from_datetimes(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::new(start.time(), end.time())
    }

    /// Whether `start < end`.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }

    /// Length of the slot.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether two slots overlap: `start1 < end2 && start2 < end1`.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `other`, padded by `gap` on both sides, reaches into this slot.
    ///
    /// True iff `other.end + gap > self.start && other.start - gap < self.end`.
    /// A zero gap reduces to [`overlaps`](Self::overlaps).
    pub fn within_gap(&self, other: &Self, gap: Duration) -> bool {
        let gap = gap.num_seconds();
        seconds(other.end) + gap > seconds(self.start)
            && seconds(other.start) - gap < seconds(self.end)
    }

    /// Whether both slots start and end at the same times.
    #[inline]
    pub fn same_window(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%-I:%M %p"),
            self.end.format("%-I:%M %p")
        )
    }
}
