use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rng};

use kartuli_core::matching::{MatchVerdict, PhraseChallenge};
use kartuli_core::model::{Course, CourseId, Item, ItemId};
use kartuli_core::text::clean_words;

use crate::course_service::CourseService;
use crate::error::CourseServiceError;

/// Builds sentence-assembly challenges for phrase courses and records
/// correct answers as learned.
#[derive(Clone)]
pub struct MatchingService {
    courses: Arc<CourseService>,
}

impl MatchingService {
    #[must_use]
    pub fn new(courses: Arc<CourseService>) -> Self {
        Self { courses }
    }

    /// Items of `course` long enough to be worth assembling (two or more words).
    ///
    /// # Errors
    ///
    /// Returns `UnknownCourse` or `MatchingUnsupported` for non-phrase courses.
    pub fn playable_items(&self, course: &CourseId) -> Result<Vec<ItemId>, CourseServiceError> {
        let course = self.phrase_course(course)?;
        Ok(course
            .items()
            .filter(|item| PhraseChallenge::word_count(item) > 1)
            .map(Item::id)
            .collect())
    }

    /// Challenge for `item` with tiles shuffled by the thread RNG.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCourse`, `UnknownItem` or `MatchingUnsupported`.
    pub fn challenge(
        &self,
        course: &CourseId,
        item: ItemId,
    ) -> Result<PhraseChallenge, CourseServiceError> {
        self.build(course, item, &mut rng())
    }

    /// Deterministic variant of [`Self::challenge`].
    ///
    /// # Errors
    ///
    /// Returns `UnknownCourse`, `UnknownItem` or `MatchingUnsupported`.
    pub fn challenge_with_seed(
        &self,
        course: &CourseId,
        item: ItemId,
        seed: u64,
    ) -> Result<PhraseChallenge, CourseServiceError> {
        self.build(course, item, &mut StdRng::seed_from_u64(seed))
    }

    /// Check the assembled answer; a correct one marks the item learned.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError` if persisting progress fails.
    pub async fn submit(
        &self,
        course: &CourseId,
        challenge: &PhraseChallenge,
    ) -> Result<MatchVerdict, CourseServiceError> {
        let verdict = challenge.check();
        if verdict == MatchVerdict::Correct {
            self.courses
                .mark_learned(course, challenge.item_id())
                .await?;
        }
        tracing::debug!(%course, item = %challenge.item_id(), ?verdict, "phrase submitted");
        Ok(verdict)
    }

    fn build<R: Rng + ?Sized>(
        &self,
        course: &CourseId,
        item: ItemId,
        rng: &mut R,
    ) -> Result<PhraseChallenge, CourseServiceError> {
        let phrase_course = self.phrase_course(course)?;
        let item = phrase_course
            .item(item)
            .ok_or_else(|| CourseServiceError::UnknownItem {
                course: course.clone(),
                item,
            })?;

        let words = clean_words(item.georgian());
        let mut order: Vec<usize> = (0..words.len()).collect();
        order.shuffle(rng);
        // A tray that reads in answer order would be solved by tapping left
        // to right. Repeated words make that a question of text, not index.
        let reads_in_order =
            |order: &[usize]| order.iter().enumerate().all(|(i, pos)| words[i] == words[*pos]);
        for _ in 1..words.len() {
            if !reads_in_order(&order) {
                break;
            }
            order.rotate_left(1);
        }
        Ok(PhraseChallenge::with_order(item, &order))
    }

    fn phrase_course(&self, id: &CourseId) -> Result<&Course, CourseServiceError> {
        let course = self.courses.course(id)?;
        if !course.kind().supports_matching() {
            return Err(CourseServiceError::MatchingUnsupported(id.clone()));
        }
        Ok(course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress_store::ProgressStore;
    use kartuli_core::Catalog;
    use kartuli_core::model::{CourseKind, Level};
    use storage::repository::InMemoryStore;

    fn service() -> MatchingService {
        let catalog = Arc::new(Catalog::builtin().unwrap());
        let progress = Arc::new(ProgressStore::new(Arc::new(InMemoryStore::new())));
        MatchingService::new(Arc::new(CourseService::new(catalog, progress)))
    }

    fn id(slug: &str) -> CourseId {
        CourseId::new(slug).unwrap()
    }

    #[test]
    fn playable_items_skip_single_words() {
        let service = service();
        let items = service.playable_items(&id("greetings")).unwrap();
        assert!(items.contains(&ItemId::new(9)));
        assert!(!items.contains(&ItemId::new(1)));
    }

    #[test]
    fn alphabet_has_no_matching() {
        let err = service().playable_items(&id("alphabet")).unwrap_err();
        assert!(matches!(err, CourseServiceError::MatchingUnsupported(_)));
    }

    #[test]
    fn shuffled_tray_is_never_presolved() {
        let service = service();
        for seed in 0..32 {
            let challenge = service
                .challenge_with_seed(&id("greetings"), ItemId::new(9), seed)
                .unwrap();
            let texts: Vec<&str> = challenge.tiles().iter().map(|t| t.text.as_str()).collect();
            assert_eq!(texts, vec!["ხარ", "როგორ"]);
        }
    }

    #[test]
    fn repeated_words_never_deal_in_answer_order() {
        let phrase = Item::new(ItemId::new(1), "ხო ხო კი", "kho kho ki", "Yes, yes, yes");
        let course = Course::new(
            id("replies"),
            "Replies",
            "Short answers",
            CourseKind::Phrases,
            vec![Level::new(1, "Basics", vec![phrase])],
        )
        .unwrap();
        let catalog = Arc::new(Catalog::new(vec![course]).unwrap());
        let progress = Arc::new(ProgressStore::new(Arc::new(InMemoryStore::new())));
        let service = MatchingService::new(Arc::new(CourseService::new(catalog, progress)));

        for seed in 0..64 {
            let challenge = service
                .challenge_with_seed(&id("replies"), ItemId::new(1), seed)
                .unwrap();
            let texts: Vec<&str> = challenge.tiles().iter().map(|t| t.text.as_str()).collect();
            assert_ne!(texts, vec!["ხო", "ხო", "კი"], "seed {seed}");
        }
    }

    #[tokio::test]
    async fn correct_submission_marks_item_learned() {
        let service = service();
        let course = id("cafe");
        service.courses.hydrate().await.unwrap();
        let mut challenge = service
            .challenge_with_seed(&course, ItemId::new(8), 7)
            .unwrap();

        let expected = ["ანგარიში", "მომიტანეთ"];
        for word in expected {
            let index = challenge
                .available()
                .find(|tile| tile.text == word)
                .map(|tile| tile.index)
                .unwrap();
            challenge.pick(index);
        }

        let verdict = service.submit(&course, &challenge).await.unwrap();
        assert_eq!(verdict, MatchVerdict::Correct);
        assert!(service.courses.is_learned(&course, ItemId::new(8)));
    }

    #[tokio::test]
    async fn incorrect_submission_leaves_progress() {
        let service = service();
        let course = id("cafe");
        service.courses.hydrate().await.unwrap();
        let mut challenge = service
            .challenge_with_seed(&course, ItemId::new(9), 3)
            .unwrap();
        let indices: Vec<usize> = challenge.tiles().iter().map(|t| t.index).collect();
        for index in indices {
            challenge.pick(index);
        }

        let verdict = service.submit(&course, &challenge).await.unwrap();
        assert_eq!(verdict, MatchVerdict::Incorrect);
        assert!(!service.courses.is_learned(&course, ItemId::new(9)));
    }
}
