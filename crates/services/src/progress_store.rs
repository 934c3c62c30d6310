use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use kartuli_core::model::{Course, CourseId, ItemId};
use kartuli_core::progress::LearnedItemSet;
use storage::keys::learned_items_key;
use storage::repository::{KeyValueStore, StorageError};

use crate::error::ProgressError;

/// Whether persisted progress has been read yet.
///
/// `Unknown` means "no data yet", not "no progress": consumers should hide
/// progress UI rather than render zeros that flip a moment later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydration {
    Unknown,
    Loaded,
}

#[derive(Debug)]
struct ProgressState {
    hydration: Hydration,
    courses: HashMap<CourseId, LearnedItemSet>,
}

/// Learned items per course, persisted through a `KeyValueStore`.
///
/// Every mutation is written to the backend before it returns. Hydration and
/// mutations are serialized by `writes`, so overlapping calls never start
/// from the same stale set.
pub struct ProgressStore {
    kv: Arc<dyn KeyValueStore>,
    state: Mutex<ProgressState>,
    writes: tokio::sync::Mutex<()>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            state: Mutex::new(ProgressState {
                hydration: Hydration::Unknown,
                courses: HashMap::new(),
            }),
            writes: tokio::sync::Mutex::new(()),
        }
    }

    fn state(&self) -> MutexGuard<'_, ProgressState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read persisted progress for `courses` and mark the store loaded.
    ///
    /// Calling it again re-reads the backend.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the backend cannot be read.
    pub async fn hydrate(&self, courses: &[CourseId]) -> Result<(), ProgressError> {
        let _writes = self.writes.lock().await;
        let mut loaded = Vec::with_capacity(courses.len());
        for course in courses {
            loaded.push((course.clone(), self.load(course).await?));
        }

        let mut state = self.state();
        state.courses.extend(loaded);
        state.hydration = Hydration::Loaded;
        tracing::debug!(courses = courses.len(), "progress hydrated");
        Ok(())
    }

    #[must_use]
    pub fn hydration(&self) -> Hydration {
        self.state().hydration
    }

    #[must_use]
    pub fn is_hydrated(&self) -> bool {
        self.hydration() == Hydration::Loaded
    }

    /// Learned items of `course`; empty while unknown.
    #[must_use]
    pub fn learned_items(&self, course: &CourseId) -> LearnedItemSet {
        let state = self.state();
        if state.hydration == Hydration::Unknown {
            return LearnedItemSet::new();
        }
        state.courses.get(course).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn is_learned(&self, course: &CourseId, item: ItemId) -> bool {
        let state = self.state();
        state.hydration == Hydration::Loaded
            && state
                .courses
                .get(course)
                .is_some_and(|set| set.contains(item))
    }

    /// Completion of `course`, or `None` until the store is hydrated.
    #[must_use]
    pub fn completion_percentage(&self, course: &Course) -> Option<u8> {
        let state = self.state();
        match state.hydration {
            Hydration::Unknown => None,
            Hydration::Loaded => Some(
                state
                    .courses
                    .get(course.id())
                    .map_or(0, |set| set.completion_for(course)),
            ),
        }
    }

    /// Mark `item` learned. Returns `false` if it already was.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the set cannot be read or written.
    pub async fn add_learned_item(
        &self,
        course: &CourseId,
        item: ItemId,
    ) -> Result<bool, ProgressError> {
        let _writes = self.writes.lock().await;
        let mut set = self.current(course).await?;
        if !set.insert(item) {
            return Ok(false);
        }
        self.persist(course, &set).await?;
        tracing::debug!(%course, %item, "item marked learned");
        self.state().courses.insert(course.clone(), set);
        Ok(true)
    }

    /// Unmark `item`. Returns `false` if it was not learned.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the set cannot be read or written.
    pub async fn remove_learned_item(
        &self,
        course: &CourseId,
        item: ItemId,
    ) -> Result<bool, ProgressError> {
        let _writes = self.writes.lock().await;
        let mut set = self.current(course).await?;
        if !set.remove(item) {
            return Ok(false);
        }
        self.persist(course, &set).await?;
        tracing::debug!(%course, %item, "item unmarked");
        self.state().courses.insert(course.clone(), set);
        Ok(true)
    }

    /// Forget every learned item of `course`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the persisted entry cannot be removed.
    pub async fn reset_progress(&self, course: &CourseId) -> Result<(), ProgressError> {
        let _writes = self.writes.lock().await;
        self.kv.remove(&learned_items_key(course)).await?;
        self.state()
            .courses
            .insert(course.clone(), LearnedItemSet::new());
        tracing::info!(%course, "progress reset");
        Ok(())
    }

    /// The cached set, or the persisted one for a course not read yet, so a
    /// mutation before hydration never overwrites stored progress.
    async fn current(&self, course: &CourseId) -> Result<LearnedItemSet, ProgressError> {
        let cached = self.state().courses.get(course).cloned();
        if let Some(set) = cached {
            return Ok(set);
        }
        self.load(course).await
    }

    async fn load(&self, course: &CourseId) -> Result<LearnedItemSet, ProgressError> {
        let raw = self.kv.get(&learned_items_key(course)).await?;
        Ok(raw.map_or_else(LearnedItemSet::new, |raw| parse_learned(course, &raw)))
    }

    async fn persist(&self, course: &CourseId, set: &LearnedItemSet) -> Result<(), ProgressError> {
        let json =
            serde_json::to_string(set).map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.kv.set(&learned_items_key(course), &json).await?;
        Ok(())
    }
}

/// Malformed data reads as "no progress yet".
fn parse_learned(course: &CourseId, raw: &str) -> LearnedItemSet {
    serde_json::from_str(raw).unwrap_or_else(|err| {
        tracing::warn!(%course, error = %err, "ignoring malformed learned items");
        LearnedItemSet::new()
    })
}
