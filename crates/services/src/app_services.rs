use std::sync::Arc;

use kartuli_core::Catalog;
use storage::repository::Storage;

use crate::course_service::CourseService;
use crate::error::AppServicesError;
use crate::matching_service::MatchingService;
use crate::progress_store::ProgressStore;
use crate::settings_service::SettingsService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    progress: Arc<ProgressStore>,
    courses: Arc<CourseService>,
    matching: Arc<MatchingService>,
    settings: Arc<SettingsService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// built-in catalog is inconsistent.
    pub async fn new_sqlite(db_url: &str) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(&storage)
    }

    /// Build services over an existing storage handle.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Course` if the built-in catalog is inconsistent.
    pub fn from_storage(storage: &Storage) -> Result<Self, AppServicesError> {
        let catalog = Arc::new(Catalog::builtin()?);
        let progress = Arc::new(ProgressStore::new(Arc::clone(&storage.kv)));
        let courses = Arc::new(CourseService::new(catalog, Arc::clone(&progress)));
        let matching = Arc::new(MatchingService::new(Arc::clone(&courses)));
        let settings = Arc::new(SettingsService::new(Arc::clone(&storage.kv)));

        Ok(Self {
            progress,
            courses,
            matching,
            settings,
        })
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressStore> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn courses(&self) -> Arc<CourseService> {
        Arc::clone(&self.courses)
    }

    #[must_use]
    pub fn matching(&self) -> Arc<MatchingService> {
        Arc::clone(&self.matching)
    }

    #[must_use]
    pub fn settings(&self) -> Arc<SettingsService> {
        Arc::clone(&self.settings)
    }
}
