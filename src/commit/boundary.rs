//! Consistency boundaries.

use dashmap::DashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::models::ScheduleEntry;

/// A contended key: writes touching the same key must not interleave.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LockKey {
    Teacher(String),
    Section(String),
}

impl LockKey {
    /// The teacher and section keys an entry contends on.
    pub fn for_entry(entry: &ScheduleEntry) -> [LockKey; 2] {
        [
            LockKey::Teacher(entry.teacher_id.clone()),
            LockKey::Section(entry.section_id.clone()),
        ]
    }
}

/// Runs a unit of work so that no other unit holding any of the same keys
/// runs concurrently.
pub trait ConsistencyBoundary: Send + Sync {
    /// Runs `work` while holding every key in `keys`.
    fn serialize<R>(&self, keys: &[LockKey], work: impl FnOnce() -> R) -> R;
}

/// Per-key mutexes for in-process stores.
///
/// Keys are sorted and deduplicated before locking, so two units of work
/// with overlapping key sets always lock in the same order.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    locks: DashMap<LockKey, Arc<Mutex<()>>>,
}

impl KeyedLocks {
    /// Creates an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys seen so far.
    pub fn key_count(&self) -> usize {
        self.locks.len()
    }
}

impl ConsistencyBoundary for KeyedLocks {
    fn serialize<R>(&self, keys: &[LockKey], work: impl FnOnce() -> R) -> R {
        let mut keys = keys.to_vec();
        keys.sort();
        keys.dedup();

        // The map shard guard is released before any mutex is taken.
        let mutexes: Vec<Arc<Mutex<()>>> = keys
            .into_iter()
            .map(|key| Arc::clone(self.locks.entry(key).or_default().value()))
            .collect();

        // The mutexes guard no data, so a poisoned one is still usable.
        let _guards: Vec<_> = mutexes
            .iter()
            .map(|m| m.lock().unwrap_or_else(PoisonError::into_inner))
            .collect();

        work()
    }
}

/// No locking. For stores whose own transactions already serialize
/// read-then-write per key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unguarded;

impl ConsistencyBoundary for Unguarded {
    fn serialize<R>(&self, _keys: &[LockKey], work: impl FnOnce() -> R) -> R {
        work()
    }
}
