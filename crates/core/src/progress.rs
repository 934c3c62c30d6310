//! Completion math and unlock gating.
//!
//! Everything here is pure: progress is passed in, decisions come out. The
//! persisted side lives in the services crate.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{Course, ItemId, Level};

/// Percentage at which a course counts as completed.
pub const COMPLETION_THRESHOLD: u8 = 100;

/// Set of item ids the user marked as learned in one course.
///
/// Serializes as a plain JSON array of integers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LearnedItemSet(BTreeSet<ItemId>);

impl LearnedItemSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item. Returns `false` if it was already present.
    pub fn insert(&mut self, item: ItemId) -> bool {
        self.0.insert(item)
    }

    /// Remove an item. Returns `false` if it was not present.
    pub fn remove(&mut self, item: ItemId) -> bool {
        self.0.remove(&item)
    }

    #[must_use]
    pub fn contains(&self, item: ItemId) -> bool {
        self.0.contains(&item)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.0.iter().copied()
    }

    /// Number of learned ids that belong to `course`.
    ///
    /// Ids left over from an older catalog revision are ignored.
    #[must_use]
    pub fn learned_in(&self, course: &Course) -> usize {
        course.items().filter(|item| self.contains(item.id())).count()
    }

    /// Completion percentage of `course` according to this set.
    #[must_use]
    pub fn completion_for(&self, course: &Course) -> u8 {
        completion_percentage(self.learned_in(course), course.total_items())
    }

    /// True when every item of `level` is learned.
    #[must_use]
    pub fn level_complete(&self, level: &Level) -> bool {
        level.item_ids().all(|id| self.contains(id))
    }
}

impl FromIterator<ItemId> for LearnedItemSet {
    fn from_iter<T: IntoIterator<Item = ItemId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// `round(learned / total * 100)`, clamped to `0..=100`.
///
/// An empty course reports 0.
#[must_use]
pub fn completion_percentage(learned: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let learned = learned.min(total) as u128;
    let total = total as u128;
    // Half-up rounding in integer space.
    let pct = (learned * 200 + total) / (total * 2);
    u8::try_from(pct.min(100)).unwrap_or(COMPLETION_THRESHOLD)
}

#[must_use]
pub fn is_course_completed(percentage: u8) -> bool {
    percentage >= COMPLETION_THRESHOLD
}

/// Whether a course can be opened, and if not, which course to finish first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseUnlockStatus {
    pub is_unlocked: bool,
    pub required_course_title: Option<String>,
}

impl CourseUnlockStatus {
    #[must_use]
    pub fn unlocked() -> Self {
        Self {
            is_unlocked: true,
            required_course_title: None,
        }
    }
}

/// Decide whether the course at zero-based `index` is accessible.
///
/// The first course is always open. Any later course opens once the course
/// right before it is completed; otherwise the status carries
/// `previous_title` so the caller can prompt the user.
#[must_use]
pub fn check_course_unlocked(
    index: usize,
    previous_completed: bool,
    previous_title: Option<&str>,
) -> CourseUnlockStatus {
    if index == 0 || previous_completed {
        return CourseUnlockStatus::unlocked();
    }
    CourseUnlockStatus {
        is_unlocked: false,
        required_course_title: previous_title.map(str::to_owned),
    }
}

/// Title and completion of one course, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseCompletion<'a> {
    pub title: &'a str,
    pub percentage: u8,
}

/// Apply [`check_course_unlocked`] across an ordered catalog.
#[must_use]
pub fn evaluate_course_unlocks(courses: &[CourseCompletion<'_>]) -> Vec<CourseUnlockStatus> {
    courses
        .iter()
        .enumerate()
        .map(|(index, _)| {
            let previous = index.checked_sub(1).and_then(|prev| courses.get(prev));
            check_course_unlocked(
                index,
                previous.is_some_and(|course| is_course_completed(course.percentage)),
                previous.map(|course| course.title),
            )
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUnlockStatus {
    pub is_unlocked: bool,
    /// Number of the level to finish first.
    pub required_level: Option<u32>,
}

/// Level-scoped counterpart of [`check_course_unlocked`].
#[must_use]
pub fn check_level_unlocked(
    index: usize,
    previous_complete: bool,
    previous_number: Option<u32>,
) -> LevelUnlockStatus {
    if index == 0 || previous_complete {
        return LevelUnlockStatus {
            is_unlocked: true,
            required_level: None,
        };
    }
    LevelUnlockStatus {
        is_unlocked: false,
        required_level: previous_number,
    }
}

/// Unlock status for every level of `course` given what has been learned.
#[must_use]
pub fn evaluate_level_unlocks(course: &Course, learned: &LearnedItemSet) -> Vec<LevelUnlockStatus> {
    let levels = course.levels();
    levels
        .iter()
        .enumerate()
        .map(|(index, _)| {
            let previous = index.checked_sub(1).and_then(|prev| levels.get(prev));
            check_level_unlocked(
                index,
                previous.is_some_and(|level| learned.level_complete(level)),
                previous.map(Level::number),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CourseId, CourseKind, Item};

    fn course() -> Course {
        let level = |number: u32, ids: &[u32]| {
            Level::new(
                number,
                format!("Level {number}"),
                ids.iter()
                    .map(|id| Item::new(ItemId::new(*id), "ა", "a", "a"))
                    .collect(),
            )
        };
        Course::new(
            CourseId::new("sample").unwrap(),
            "Sample",
            "",
            CourseKind::Alphabet,
            vec![level(1, &[1, 2]), level(2, &[3])],
        )
        .unwrap()
    }

    #[test]
    fn first_course_is_always_unlocked() {
        for completed in [true, false] {
            let status = check_course_unlocked(0, completed, Some("Anything"));
            assert!(status.is_unlocked);
            assert_eq!(status.required_course_title, None);
        }
    }

    #[test]
    fn later_course_follows_previous_completion() {
        for index in [1, 2, 7] {
            assert!(check_course_unlocked(index, true, Some("Alphabet")).is_unlocked);
            let locked = check_course_unlocked(index, false, Some("Alphabet"));
            assert!(!locked.is_unlocked);
            assert_eq!(locked.required_course_title.as_deref(), Some("Alphabet"));
        }
    }

    #[test]
    fn locked_without_title_has_no_prompt() {
        let status = check_course_unlocked(3, false, None);
        assert!(!status.is_unlocked);
        assert_eq!(status.required_course_title, None);
    }

    #[test]
    fn completion_threshold() {
        assert!(is_course_completed(100));
        assert!(is_course_completed(u8::MAX));
        assert!(!is_course_completed(99));
        assert!(!is_course_completed(0));
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(completion_percentage(0, 3), 0);
        assert_eq!(completion_percentage(1, 3), 33);
        assert_eq!(completion_percentage(2, 3), 67);
        assert_eq!(completion_percentage(1, 8), 13);
        assert_eq!(completion_percentage(3, 3), 100);
        assert_eq!(completion_percentage(199, 200), 100);
        assert_eq!(completion_percentage(5, 0), 0);
        assert_eq!(completion_percentage(9, 3), 100);
    }

    #[test]
    fn learned_set_ignores_foreign_ids() {
        let course = course();
        let set: LearnedItemSet = [ItemId::new(1), ItemId::new(42)].into_iter().collect();
        assert_eq!(set.learned_in(&course), 1);
        assert_eq!(set.completion_for(&course), 33);
    }

    #[test]
    fn learned_set_insert_is_idempotent() {
        let mut set = LearnedItemSet::new();
        assert!(set.insert(ItemId::new(5)));
        assert!(!set.insert(ItemId::new(5)));
        assert_eq!(set.len(), 1);
        assert_eq!(serde_json::to_string(&set).unwrap(), "[5]");
    }

    #[test]
    fn catalog_unlocks_chain() {
        let statuses = evaluate_course_unlocks(&[
            CourseCompletion {
                title: "Alphabet",
                percentage: 100,
            },
            CourseCompletion {
                title: "Numbers",
                percentage: 40,
            },
            CourseCompletion {
                title: "Greetings",
                percentage: 100,
            },
        ]);
        assert!(statuses[0].is_unlocked);
        assert!(statuses[1].is_unlocked);
        assert!(!statuses[2].is_unlocked);
        assert_eq!(statuses[2].required_course_title.as_deref(), Some("Numbers"));
    }

    #[test]
    fn levels_unlock_after_previous_level() {
        let course = course();
        let mut learned = LearnedItemSet::new();
        learned.insert(ItemId::new(1));
        let statuses = evaluate_level_unlocks(&course, &learned);
        assert!(statuses[0].is_unlocked);
        assert_eq!(
            statuses[1],
            LevelUnlockStatus {
                is_unlocked: false,
                required_level: Some(1)
            }
        );

        learned.insert(ItemId::new(2));
        let statuses = evaluate_level_unlocks(&course, &learned);
        assert!(statuses[1].is_unlocked);
    }
}
