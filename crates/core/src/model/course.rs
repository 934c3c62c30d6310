use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{CourseId, ItemId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course title cannot be empty")]
    EmptyTitle,

    #[error("course must contain at least one level")]
    NoLevels,

    #[error("level {0} has no items")]
    EmptyLevel(u32),

    #[error("item {0} appears more than once in the course")]
    DuplicateItem(ItemId),

    #[error("item {0} has empty Georgian text")]
    EmptyItemText(ItemId),

    #[error("course {0} appears more than once in the catalog")]
    DuplicateCourse(CourseId),
}

//
// ─── ITEMS ─────────────────────────────────────────────────────────────────────
//

/// A single flashcard: Georgian on the front, transliteration and meaning on the back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    georgian: String,
    transliteration: String,
    meaning: String,
}

impl Item {
    #[must_use]
    pub fn new(
        id: ItemId,
        georgian: impl Into<String>,
        transliteration: impl Into<String>,
        meaning: impl Into<String>,
    ) -> Self {
        Self {
            id,
            georgian: georgian.into(),
            transliteration: transliteration.into(),
            meaning: meaning.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    #[must_use]
    pub fn georgian(&self) -> &str {
        &self.georgian
    }

    #[must_use]
    pub fn transliteration(&self) -> &str {
        &self.transliteration
    }

    #[must_use]
    pub fn meaning(&self) -> &str {
        &self.meaning
    }
}

//
// ─── LEVELS ────────────────────────────────────────────────────────────────────
//

/// An ordered group of items inside a course, unlocked one after another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    number: u32,
    title: String,
    items: Vec<Item>,
}

impl Level {
    #[must_use]
    pub fn new(number: u32, title: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            number,
            title: title.into(),
            items,
        }
    }

    /// 1-based position of the level within its course.
    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().map(Item::id)
    }
}

//
// ─── COURSES ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseKind {
    Alphabet,
    Numbers,
    Phrases,
}

impl CourseKind {
    /// Phrase courses offer sentence-assembly gameplay in addition to flashcards.
    #[must_use]
    pub fn supports_matching(self) -> bool {
        matches!(self, CourseKind::Phrases)
    }
}

/// A themed collection of items exposed as one navigable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    id: CourseId,
    title: String,
    description: String,
    kind: CourseKind,
    levels: Vec<Level>,
}

impl Course {
    /// Creates a validated course.
    ///
    /// # Errors
    ///
    /// Returns `CourseError` if the title is blank, there are no levels, a
    /// level is empty, an item has no Georgian text, or an item id repeats.
    pub fn new(
        id: CourseId,
        title: impl Into<String>,
        description: impl Into<String>,
        kind: CourseKind,
        levels: Vec<Level>,
    ) -> Result<Self, CourseError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(CourseError::EmptyTitle);
        }
        if levels.is_empty() {
            return Err(CourseError::NoLevels);
        }

        let mut seen = HashSet::new();
        for level in &levels {
            if level.items.is_empty() {
                return Err(CourseError::EmptyLevel(level.number));
            }
            for item in &level.items {
                if item.georgian.trim().is_empty() {
                    return Err(CourseError::EmptyItemText(item.id));
                }
                if !seen.insert(item.id) {
                    return Err(CourseError::DuplicateItem(item.id));
                }
            }
        }

        Ok(Self {
            id,
            title,
            description: description.into(),
            kind,
            levels,
        })
    }

    #[must_use]
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn kind(&self) -> CourseKind {
        self.kind
    }

    #[must_use]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// All items in level order.
    pub fn items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.levels.iter().flat_map(|level| level.items.iter())
    }

    #[must_use]
    pub fn total_items(&self) -> usize {
        self.levels.iter().map(|level| level.items.len()).sum()
    }

    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items().find(|item| item.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.item(id).is_some()
    }

    #[must_use]
    pub fn level(&self, number: u32) -> Option<&Level> {
        self.levels.iter().find(|level| level.number == number)
    }
}
