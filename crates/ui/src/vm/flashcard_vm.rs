use kartuli_core::model::{ItemId, Level};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardSide {
    Front,
    Back,
}

/// One flashcard ready to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardFaceVm {
    pub item_id: ItemId,
    pub georgian: String,
    pub transliteration: String,
    pub meaning: String,
}

/// Walks the cards of one level with flip/reveal state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashcardDeckVm {
    level: u32,
    cards: Vec<CardFaceVm>,
    position: usize,
    side: CardSide,
}

impl FlashcardDeckVm {
    #[must_use]
    pub fn new(level: &Level) -> Self {
        let cards = level
            .items()
            .iter()
            .map(|item| CardFaceVm {
                item_id: item.id(),
                georgian: item.georgian().to_string(),
                transliteration: item.transliteration().to_string(),
                meaning: item.meaning().to_string(),
            })
            .collect();
        Self {
            level: level.number(),
            cards,
            position: 0,
            side: CardSide::Front,
        }
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn current(&self) -> Option<&CardFaceVm> {
        self.cards.get(self.position)
    }

    #[must_use]
    pub fn side(&self) -> CardSide {
        self.side
    }

    pub fn flip(&mut self) {
        self.side = match self.side {
            CardSide::Front => CardSide::Back,
            CardSide::Back => CardSide::Front,
        };
    }

    /// Move to the next card, face up. Returns `false` on the last card.
    pub fn next(&mut self) -> bool {
        if self.position + 1 >= self.cards.len() {
            return false;
        }
        self.position += 1;
        self.side = CardSide::Front;
        true
    }

    /// Move to the previous card, face up. Returns `false` on the first card.
    pub fn previous(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        self.side = CardSide::Front;
        true
    }

    /// Start at the first card `is_learned` rejects, or stay put if all are learned.
    pub fn skip_to_first_unlearned(&mut self, is_learned: impl Fn(ItemId) -> bool) {
        if let Some(pos) = self.cards.iter().position(|card| !is_learned(card.item_id)) {
            self.position = pos;
            self.side = CardSide::Front;
        }
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.position > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.position + 1 < self.cards.len()
    }

    #[must_use]
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.position + 1, self.cards.len())
    }
}
