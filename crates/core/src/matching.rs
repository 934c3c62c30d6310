//! Sentence assembly gameplay for phrase courses.

use serde::{Deserialize, Serialize};

use crate::model::{Item, ItemId};
use crate::text::{clean_words, normalize_for_comparison};

/// One tappable word. `index` is its position in the shuffled tray, so two
/// identical words remain distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordTile {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchVerdict {
    Correct,
    Incorrect,
    /// Not every tile has been placed yet.
    Incomplete,
}

/// A phrase to rebuild from shuffled words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseChallenge {
    item_id: ItemId,
    prompt: String,
    expected: String,
    tiles: Vec<WordTile>,
    picked: Vec<usize>,
}

impl PhraseChallenge {
    /// Build a challenge whose tiles appear in the order given by `order`.
    ///
    /// `order` is a permutation of the word positions of the phrase; any
    /// position it misses is appended so no word is lost.
    #[must_use]
    pub fn with_order(item: &Item, order: &[usize]) -> Self {
        let words = clean_words(item.georgian());
        let mut arranged: Vec<usize> = Vec::with_capacity(words.len());
        for pos in order.iter().copied() {
            if pos < words.len() && !arranged.contains(&pos) {
                arranged.push(pos);
            }
        }
        for pos in 0..words.len() {
            if !arranged.contains(&pos) {
                arranged.push(pos);
            }
        }

        let tiles = arranged
            .into_iter()
            .enumerate()
            .map(|(index, pos)| WordTile {
                index,
                text: words[pos].clone(),
            })
            .collect();

        Self {
            item_id: item.id(),
            prompt: item.meaning().to_string(),
            expected: item.georgian().to_string(),
            tiles,
            picked: Vec::new(),
        }
    }

    /// Number of words the phrase splits into.
    #[must_use]
    pub fn word_count(item: &Item) -> usize {
        clean_words(item.georgian()).len()
    }

    #[must_use]
    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn expected(&self) -> &str {
        &self.expected
    }

    #[must_use]
    pub fn tiles(&self) -> &[WordTile] {
        &self.tiles
    }

    /// Tiles not yet placed in the answer row.
    pub fn available(&self) -> impl Iterator<Item = &WordTile> + '_ {
        self.tiles
            .iter()
            .filter(|tile| !self.picked.contains(&tile.index))
    }

    /// Tiles placed in the answer row, in placement order.
    pub fn picked(&self) -> impl Iterator<Item = &WordTile> + '_ {
        self.picked.iter().filter_map(|index| self.tiles.get(*index))
    }

    /// Place a tile. Returns `false` for unknown or already placed tiles.
    pub fn pick(&mut self, index: usize) -> bool {
        if index >= self.tiles.len() || self.picked.contains(&index) {
            return false;
        }
        self.picked.push(index);
        true
    }

    /// Return the tile at `position` in the answer row to the tray.
    pub fn unpick(&mut self, position: usize) -> Option<usize> {
        (position < self.picked.len()).then(|| self.picked.remove(position))
    }

    pub fn clear(&mut self) {
        self.picked.clear();
    }

    /// The sentence assembled so far.
    #[must_use]
    pub fn assembled(&self) -> String {
        self.picked()
            .map(|tile| tile.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[must_use]
    pub fn check(&self) -> MatchVerdict {
        if self.picked.len() < self.tiles.len() {
            return MatchVerdict::Incomplete;
        }
        if normalize_for_comparison(&self.assembled()) == normalize_for_comparison(&self.expected)
        {
            MatchVerdict::Correct
        } else {
            MatchVerdict::Incorrect
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> Item {
        Item::new(ItemId::new(7), "როგორ ხარ?", "rogor khar?", "How are you?")
    }

    #[test]
    fn tiles_follow_given_order() {
        let challenge = PhraseChallenge::with_order(&item(), &[1, 0]);
        let texts: Vec<&str> = challenge.tiles().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["ხარ", "როგორ"]);
        assert_eq!(challenge.prompt(), "How are you?");
    }

    #[test]
    fn missing_positions_are_appended() {
        let challenge = PhraseChallenge::with_order(&item(), &[5, 1]);
        assert_eq!(challenge.tiles().len(), 2);
        assert_eq!(challenge.tiles()[1].text, "როგორ");
    }

    #[test]
    fn correct_assembly_ignores_punctuation() {
        let mut challenge = PhraseChallenge::with_order(&item(), &[1, 0]);
        assert_eq!(challenge.check(), MatchVerdict::Incomplete);
        assert!(challenge.pick(1));
        assert!(challenge.pick(0));
        assert_eq!(challenge.assembled(), "როგორ ხარ");
        assert_eq!(challenge.check(), MatchVerdict::Correct);
    }

    #[test]
    fn wrong_order_is_incorrect_and_can_be_undone() {
        let mut challenge = PhraseChallenge::with_order(&item(), &[1, 0]);
        challenge.pick(0);
        challenge.pick(1);
        assert_eq!(challenge.check(), MatchVerdict::Incorrect);
        assert_eq!(challenge.unpick(0), Some(0));
        assert_eq!(challenge.available().count(), 1);
        challenge.clear();
        assert_eq!(challenge.picked().count(), 0);
    }

    #[test]
    fn pick_rejects_duplicates_and_out_of_range() {
        let mut challenge = PhraseChallenge::with_order(&item(), &[0, 1]);
        assert!(challenge.pick(0));
        assert!(!challenge.pick(0));
        assert!(!challenge.pick(9));
        assert_eq!(challenge.unpick(4), None);
    }
}
