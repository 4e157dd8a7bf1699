//! Schedule repositories.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

use crate::constraints::ComparisonSets;
use crate::models::{ScheduleEntry, Timetable};

/// Where entries live.
///
/// Implementations fetch the scoped comparison sets and apply writes. They
/// need not be transactional themselves when paired with a locking
/// [`ConsistencyBoundary`](super::ConsistencyBoundary).
pub trait ScheduleRepository: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Comparison sets for `candidate`, excluding the entry with the
    /// candidate's id.
    fn comparison_sets(&self, candidate: &ScheduleEntry) -> Result<ComparisonSets, Self::Error>;

    /// Fetches an entry by id.
    fn get(&self, id: &str) -> Result<Option<ScheduleEntry>, Self::Error>;

    /// Stores a new entry and returns it with its assigned id.
    fn insert(&self, entry: ScheduleEntry) -> Result<ScheduleEntry, Self::Error>;

    /// Replaces an existing entry. Returns `None` if no entry has `id`.
    fn replace(&self, id: &str, entry: ScheduleEntry)
        -> Result<Option<ScheduleEntry>, Self::Error>;

    /// Removes an entry. Returns `None` if no entry has `id`.
    fn remove(&self, id: &str) -> Result<Option<ScheduleEntry>, Self::Error>;
}

/// Errors from the in-memory repository.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A writer panicked while holding the timetable.
    #[error("timetable store lock poisoned")]
    Poisoned,
}

/// A `Timetable` behind a mutex, assigning sequential `E{n}` ids.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    timetable: Mutex<Timetable>,
    next_id: AtomicU64,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with committed entries.
    ///
    /// Seed entries keep their ids; entries without one get a fresh id.
    pub fn with_timetable(timetable: Timetable) -> Self {
        let repo = Self::new();
        {
            let mut guard = repo.timetable.lock().unwrap_or_else(|e| e.into_inner());
            for mut entry in timetable.entries {
                if entry.id.is_none() {
                    entry.id = Some(repo.fresh_id());
                }
                guard.add_entry(entry);
            }
        }
        repo
    }

    /// Copy of the current timetable.
    pub fn snapshot(&self) -> Result<Timetable, StoreError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Timetable>, StoreError> {
        self.timetable.lock().map_err(|_| StoreError::Poisoned)
    }

    fn fresh_id(&self) -> String {
        format!("E{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

impl ScheduleRepository for InMemoryRepository {
    type Error = StoreError;

    fn comparison_sets(&self, candidate: &ScheduleEntry) -> Result<ComparisonSets, StoreError> {
        let timetable = self.lock()?;
        Ok(ComparisonSets::from_timetable(candidate, &timetable))
    }

    fn get(&self, id: &str) -> Result<Option<ScheduleEntry>, StoreError> {
        Ok(self.lock()?.entry(id).cloned())
    }

    fn insert(&self, mut entry: ScheduleEntry) -> Result<ScheduleEntry, StoreError> {
        let mut timetable = self.lock()?;
        if entry.id.is_none() {
            entry.id = Some(self.fresh_id());
        }
        let now = Utc::now().naive_utc();
        entry.created_at = Some(now);
        entry.updated_at = Some(now);
        timetable.add_entry(entry.clone());
        Ok(entry)
    }

    fn replace(
        &self,
        id: &str,
        mut entry: ScheduleEntry,
    ) -> Result<Option<ScheduleEntry>, StoreError> {
        let mut timetable = self.lock()?;
        let Some(created_at) = timetable.entry(id).map(|e| e.created_at) else {
            return Ok(None);
        };
        entry.id = Some(id.to_string());
        entry.created_at = created_at;
        entry.updated_at = Some(Utc::now().naive_utc());
        timetable.replace_entry(id, entry.clone());
        Ok(Some(entry))
    }

    fn remove(&self, id: &str) -> Result<Option<ScheduleEntry>, StoreError> {
        Ok(self.lock()?.remove_entry(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeSlot;

    fn entry(teacher: &str, section: &str) -> ScheduleEntry {
        ScheduleEntry::new(teacher, "MATH", section)
            .with_days("MWF")
            .unwrap()
            .with_slot(TimeSlot::hm(9, 0, 10, 0).unwrap())
    }

    #[test]
    fn test_insert_assigns_ids_and_timestamps() {
        let repo = InMemoryRepository::new();
        let a = repo.insert(entry("T1", "7-A")).unwrap();
        let b = repo.insert(entry("T2", "7-B")).unwrap();
        assert_eq!(a.id.as_deref(), Some("E1"));
        assert_eq!(b.id.as_deref(), Some("E2"));
        assert!(a.created_at.is_some());
        assert_eq!(repo.get("E2").unwrap().unwrap().teacher_id, "T2");
    }

    #[test]
    fn test_replace_keeps_created_at() {
        let repo = InMemoryRepository::new();
        let a = repo.insert(entry("T1", "7-A")).unwrap();
        let replaced = repo.replace("E1", entry("T3", "7-A")).unwrap().unwrap();
        assert_eq!(replaced.created_at, a.created_at);
        assert!(replaced.has_id("E1"));
        assert_eq!(repo.get("E1").unwrap().unwrap().teacher_id, "T3");
        assert!(repo.replace("E9", entry("T3", "7-A")).unwrap().is_none());
    }

    #[test]
    fn test_comparison_sets_exclude_self() {
        let repo = InMemoryRepository::new();
        let a = repo.insert(entry("T1", "7-A")).unwrap();
        let sets = repo.comparison_sets(&a).unwrap();
        assert!(sets.is_empty());

        let sets = repo.comparison_sets(&entry("T1", "7-A")).unwrap();
        assert_eq!(sets.teacher_entries.len(), 1);
        assert_eq!(sets.section_entries.len(), 1);
        assert_eq!(sets.subject_section_day.len(), 1);
    }

    #[test]
    fn test_seeded_repository() {
        let seed = Timetable::new()
            .with_entry(entry("T1", "7-A").with_id("X9"))
            .with_entry(entry("T2", "7-B"));
        let repo = InMemoryRepository::with_timetable(seed);
        let snap = repo.snapshot().unwrap();
        assert_eq!(snap.len(), 2);
        assert!(snap.entry("X9").is_some());
        assert!(snap.entry("E1").is_some());
    }

    #[test]
    fn test_remove() {
        let repo = InMemoryRepository::new();
        repo.insert(entry("T1", "7-A")).unwrap();
        assert!(repo.remove("E1").unwrap().is_some());
        assert!(repo.remove("E1").unwrap().is_none());
        assert!(repo.snapshot().unwrap().is_empty());
    }
}
