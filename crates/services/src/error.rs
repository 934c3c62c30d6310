//! Shared error types for the services crate.

use thiserror::Error;

use kartuli_core::model::{CourseError, CourseId, ItemId};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ProgressStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CourseService` and `MatchingService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CourseServiceError {
    #[error("unknown course: {0}")]
    UnknownCourse(CourseId),
    #[error("course {course} has no item {item}")]
    UnknownItem { course: CourseId, item: ItemId },
    #[error("course {0} has no phrase matching")]
    MatchingUnsupported(CourseId),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

/// Errors emitted by `SettingsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Course(#[from] CourseError),
}
