//! Timetable service: validated create, update, and delete.

use thiserror::Error;
use tracing::{info, warn};

use super::{ConsistencyBoundary, KeyedLocks, LockKey, ScheduleRepository};
use crate::config::ValidationPolicy;
use crate::constraints::ValidationPipeline;
use crate::error::Rejection;
use crate::models::ScheduleEntry;

/// Errors from a commit attempt.
#[derive(Debug, Error)]
pub enum CommitError<E: std::error::Error + 'static> {
    /// The pipeline rejected the entry.
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// No entry has the given id.
    #[error("schedule entry {0} not found")]
    NotFound(String),

    /// The repository failed.
    #[error("repository error: {0}")]
    Repository(#[source] E),
}

impl<E: std::error::Error + 'static> CommitError<E> {
    /// The rejection, if the pipeline refused the entry.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            CommitError::Rejected(r) => Some(r),
            _ => None,
        }
    }
}

/// Runs read → validate → write as one unit of work per contended key.
#[derive(Debug)]
pub struct TimetableService<R, B = KeyedLocks> {
    repository: R,
    boundary: B,
    pipeline: ValidationPipeline,
}

impl<R, B> TimetableService<R, B>
where
    R: ScheduleRepository,
    B: ConsistencyBoundary,
{
    /// Creates a service with the standard pipeline for `policy`.
    pub fn new(repository: R, boundary: B, policy: &ValidationPolicy) -> Self {
        Self::with_pipeline(repository, boundary, ValidationPipeline::standard(policy))
    }

    /// Creates a service with a custom pipeline.
    pub fn with_pipeline(repository: R, boundary: B, pipeline: ValidationPipeline) -> Self {
        Self {
            repository,
            boundary,
            pipeline,
        }
    }

    /// The underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Validates and stores a new entry. Any id on `entry` is discarded;
    /// the repository assigns one.
    pub fn create(&self, mut entry: ScheduleEntry) -> Result<ScheduleEntry, CommitError<R::Error>> {
        entry.id = None;
        let keys = LockKey::for_entry(&entry);

        self.boundary.serialize(&keys, || -> Result<_, CommitError<R::Error>> {
            let sets = self
                .repository
                .comparison_sets(&entry)
                .map_err(CommitError::Repository)?;
            self.check(&entry, &sets)?;

            let saved = self
                .repository
                .insert(entry)
                .map_err(CommitError::Repository)?;
            info!(
                entry = saved.id.as_deref().unwrap_or_default(),
                teacher = %saved.teacher_id,
                section = %saved.section_id,
                "schedule entry created"
            );
            Ok(saved)
        })
    }

    /// Replaces entry `id` with `entry`, re-running every check as if
    /// inserting fresh, with the previous version excluded.
    ///
    /// Holds the teacher and section keys of both the stored and the new
    /// version, so a concurrent write on either side waits.
    pub fn update(
        &self,
        id: &str,
        mut entry: ScheduleEntry,
    ) -> Result<ScheduleEntry, CommitError<R::Error>> {
        entry.id = Some(id.to_string());
        let previous = self.stored(id)?;
        let keys: Vec<LockKey> = LockKey::for_entry(&previous)
            .into_iter()
            .chain(LockKey::for_entry(&entry))
            .collect();

        self.boundary.serialize(&keys, || -> Result<_, CommitError<R::Error>> {
            // Re-read under the locks; a concurrent delete wins.
            self.stored(id)?;

            let sets = self
                .repository
                .comparison_sets(&entry)
                .map_err(CommitError::Repository)?;
            self.check(&entry, &sets)?;

            let saved = self
                .repository
                .replace(id, entry)
                .map_err(CommitError::Repository)?
                .ok_or_else(|| CommitError::NotFound(id.to_string()))?;
            info!(
                entry = id,
                teacher = %saved.teacher_id,
                section = %saved.section_id,
                "schedule entry updated"
            );
            Ok(saved)
        })
    }

    /// Removes entry `id`. Other entries are not re-validated.
    pub fn delete(&self, id: &str) -> Result<ScheduleEntry, CommitError<R::Error>> {
        let removed = self
            .repository
            .remove(id)
            .map_err(CommitError::Repository)?
            .ok_or_else(|| CommitError::NotFound(id.to_string()))?;
        info!(entry = id, teacher = %removed.teacher_id, "schedule entry deleted");
        Ok(removed)
    }

    fn stored(&self, id: &str) -> Result<ScheduleEntry, CommitError<R::Error>> {
        self.repository
            .get(id)
            .map_err(CommitError::Repository)?
            .ok_or_else(|| CommitError::NotFound(id.to_string()))
    }

    fn check(
        &self,
        entry: &ScheduleEntry,
        sets: &crate::constraints::ComparisonSets,
    ) -> Result<(), Rejection> {
        self.pipeline.validate(entry, sets).inspect_err(|rejection| {
            warn!(
                teacher = %entry.teacher_id,
                section = %entry.section_id,
                kind = ?rejection.kind(),
                "schedule entry rejected: {rejection}"
            );
        })
    }
}
