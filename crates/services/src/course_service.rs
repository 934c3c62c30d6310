use std::sync::Arc;

use kartuli_core::Catalog;
use kartuli_core::model::{Course, CourseId, CourseKind, ItemId};
use kartuli_core::progress::{
    CourseCompletion, CourseUnlockStatus, LevelUnlockStatus, evaluate_course_unlocks,
    evaluate_level_unlocks,
};

use crate::error::CourseServiceError;
use crate::progress_store::ProgressStore;

/// Course card data for the home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseOverview {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub kind: CourseKind,
    pub learned: usize,
    pub total: usize,
    /// `None` until progress has been hydrated.
    pub percentage: Option<u8>,
    pub unlock: CourseUnlockStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelOverview {
    pub number: u32,
    pub title: String,
    pub learned: usize,
    pub total: usize,
    pub unlock: LevelUnlockStatus,
}

/// Combines the catalog with learned progress and unlock gating.
#[derive(Clone)]
pub struct CourseService {
    catalog: Arc<Catalog>,
    progress: Arc<ProgressStore>,
}

impl CourseService {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, progress: Arc<ProgressStore>) -> Self {
        Self { catalog, progress }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressStore> {
        Arc::clone(&self.progress)
    }

    /// Load persisted progress for every catalog course.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Progress` if storage cannot be read.
    pub async fn hydrate(&self) -> Result<(), CourseServiceError> {
        let ids: Vec<CourseId> = self.catalog.ids().cloned().collect();
        self.progress.hydrate(&ids).await?;
        Ok(())
    }

    /// Look up a course by id.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::UnknownCourse` if the catalog has no such course.
    pub fn course(&self, id: &CourseId) -> Result<&Course, CourseServiceError> {
        self.catalog
            .get(id)
            .ok_or_else(|| CourseServiceError::UnknownCourse(id.clone()))
    }

    /// Overview of every course in unlock order.
    ///
    /// Before hydration, percentages are `None` and only the first course is
    /// reported unlocked.
    #[must_use]
    pub fn overviews(&self) -> Vec<CourseOverview> {
        let courses = self.catalog.courses();
        let percentages: Vec<Option<u8>> = courses
            .iter()
            .map(|course| self.progress.completion_percentage(course))
            .collect();
        let completions: Vec<CourseCompletion<'_>> = courses
            .iter()
            .zip(&percentages)
            .map(|(course, pct)| CourseCompletion {
                title: course.title(),
                percentage: pct.unwrap_or(0),
            })
            .collect();
        let unlocks = evaluate_course_unlocks(&completions);

        courses
            .iter()
            .zip(percentages)
            .zip(unlocks)
            .map(|((course, percentage), unlock)| CourseOverview {
                id: course.id().clone(),
                title: course.title().to_string(),
                description: course.description().to_string(),
                kind: course.kind(),
                learned: self.progress.learned_items(course.id()).learned_in(course),
                total: course.total_items(),
                percentage,
                unlock,
            })
            .collect()
    }

    /// Overview of a single course.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::UnknownCourse` if the catalog has no such course.
    pub fn overview(&self, id: &CourseId) -> Result<CourseOverview, CourseServiceError> {
        self.overviews()
            .into_iter()
            .find(|overview| &overview.id == id)
            .ok_or_else(|| CourseServiceError::UnknownCourse(id.clone()))
    }

    /// Per-level progress and unlock state of a course.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::UnknownCourse` if the catalog has no such course.
    pub fn level_overviews(&self, id: &CourseId) -> Result<Vec<LevelOverview>, CourseServiceError> {
        let course = self.course(id)?;
        let learned = self.progress.learned_items(id);
        let unlocks = evaluate_level_unlocks(course, &learned);
        Ok(course
            .levels()
            .iter()
            .zip(unlocks)
            .map(|(level, unlock)| LevelOverview {
                number: level.number(),
                title: level.title().to_string(),
                learned: level.item_ids().filter(|id| learned.contains(*id)).count(),
                total: level.items().len(),
                unlock,
            })
            .collect())
    }

    #[must_use]
    pub fn is_learned(&self, course: &CourseId, item: ItemId) -> bool {
        self.progress.is_learned(course, item)
    }

    /// Mark an item of `course` learned.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::UnknownCourse` / `UnknownItem` for ids
    /// outside the catalog, or `Progress` if persistence fails.
    pub async fn mark_learned(
        &self,
        course: &CourseId,
        item: ItemId,
    ) -> Result<bool, CourseServiceError> {
        self.ensure_item(course, item)?;
        Ok(self.progress.add_learned_item(course, item).await?)
    }

    /// Unmark an item of `course`.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::UnknownCourse` / `UnknownItem` for ids
    /// outside the catalog, or `Progress` if persistence fails.
    pub async fn unmark_learned(
        &self,
        course: &CourseId,
        item: ItemId,
    ) -> Result<bool, CourseServiceError> {
        self.ensure_item(course, item)?;
        Ok(self.progress.remove_learned_item(course, item).await?)
    }

    /// Clear all progress of `course`.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::UnknownCourse` for unknown ids, or
    /// `Progress` if persistence fails.
    pub async fn reset(&self, course: &CourseId) -> Result<(), CourseServiceError> {
        self.course(course)?;
        self.progress.reset_progress(course).await?;
        Ok(())
    }

    fn ensure_item(&self, course: &CourseId, item: ItemId) -> Result<(), CourseServiceError> {
        if self.course(course)?.contains(item) {
            Ok(())
        } else {
            Err(CourseServiceError::UnknownItem {
                course: course.clone(),
                item,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryStore;

    fn service() -> CourseService {
        let catalog = Arc::new(Catalog::builtin().unwrap());
        let progress = Arc::new(ProgressStore::new(Arc::new(InMemoryStore::new())));
        CourseService::new(catalog, progress)
    }

    fn id(slug: &str) -> CourseId {
        CourseId::new(slug).unwrap()
    }

    #[tokio::test]
    async fn overviews_hide_percentages_until_hydrated() {
        let service = service();
        let before = service.overviews();
        assert!(before.iter().all(|overview| overview.percentage.is_none()));
        assert!(before[0].unlock.is_unlocked);
        assert!(!before[1].unlock.is_unlocked);

        service.hydrate().await.unwrap();
        let after = service.overviews();
        assert!(after.iter().all(|overview| overview.percentage == Some(0)));
    }

    #[tokio::test]
    async fn completing_alphabet_unlocks_numbers() {
        let service = service();
        service.hydrate().await.unwrap();
        let alphabet = id("alphabet");

        let locked = service.overview(&id("numbers")).unwrap();
        assert_eq!(
            locked.unlock.required_course_title.as_deref(),
            Some("Alphabet")
        );

        for item in 1..=33 {
            service.mark_learned(&alphabet, ItemId::new(item)).await.unwrap();
        }

        let overviews = service.overviews();
        assert_eq!(overviews[0].percentage, Some(100));
        assert_eq!(overviews[0].learned, 33);
        assert!(overviews[1].unlock.is_unlocked);
        assert!(!overviews[2].unlock.is_unlocked);
        assert_eq!(
            overviews[2].unlock.required_course_title.as_deref(),
            Some("Numbers")
        );
    }

    #[tokio::test]
    async fn rejects_items_outside_course() {
        let service = service();
        service.hydrate().await.unwrap();
        let err = service
            .mark_learned(&id("numbers"), ItemId::new(13))
            .await
            .unwrap_err();
        assert!(matches!(err, CourseServiceError::UnknownItem { .. }));

        let err = service.reset(&id("klingon")).await.unwrap_err();
        assert!(matches!(err, CourseServiceError::UnknownCourse(_)));
    }

    #[tokio::test]
    async fn level_overviews_track_progress() {
        let service = service();
        service.hydrate().await.unwrap();
        let numbers = id("numbers");
        for item in 1..=10 {
            service.mark_learned(&numbers, ItemId::new(item)).await.unwrap();
        }
        service.mark_learned(&numbers, ItemId::new(100)).await.unwrap();

        let levels = service.level_overviews(&numbers).unwrap();
        assert_eq!(levels[0].learned, 10);
        assert_eq!(levels[0].total, 10);
        assert!(levels[1].unlock.is_unlocked);
        assert_eq!(levels[1].learned, 1);
        assert_eq!(levels[1].total, 8);
    }
}
