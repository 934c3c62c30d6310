use kartuli_core::matching::{MatchVerdict, PhraseChallenge};
use kartuli_core::model::ItemId;

/// A run through the playable phrases of a course.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchRoundVm {
    queue: Vec<ItemId>,
    position: usize,
    challenge: Option<PhraseChallenge>,
    verdict: Option<MatchVerdict>,
    correct: usize,
}

impl MatchRoundVm {
    #[must_use]
    pub fn new(queue: Vec<ItemId>) -> Self {
        Self {
            queue,
            position: 0,
            challenge: None,
            verdict: None,
            correct: 0,
        }
    }

    /// Item the round is currently on, `None` once finished.
    #[must_use]
    pub fn current_item(&self) -> Option<ItemId> {
        self.queue.get(self.position).copied()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.position >= self.queue.len()
    }

    pub fn set_challenge(&mut self, challenge: PhraseChallenge) {
        self.challenge = Some(challenge);
        self.verdict = None;
    }

    #[must_use]
    pub fn challenge(&self) -> Option<&PhraseChallenge> {
        self.challenge.as_ref()
    }

    pub fn pick(&mut self, tile: usize) {
        if let Some(challenge) = self.challenge.as_mut() {
            challenge.pick(tile);
            self.verdict = None;
        }
    }

    pub fn unpick(&mut self, position: usize) {
        if let Some(challenge) = self.challenge.as_mut() {
            challenge.unpick(position);
            self.verdict = None;
        }
    }

    pub fn clear(&mut self) {
        if let Some(challenge) = self.challenge.as_mut() {
            challenge.clear();
            self.verdict = None;
        }
    }

    pub fn record(&mut self, verdict: MatchVerdict) {
        if verdict == MatchVerdict::Correct && self.verdict != Some(MatchVerdict::Correct) {
            self.correct += 1;
        }
        self.verdict = Some(verdict);
    }

    #[must_use]
    pub fn verdict(&self) -> Option<MatchVerdict> {
        self.verdict
    }

    /// Move on to the next phrase. Returns its id, if any.
    pub fn advance(&mut self) -> Option<ItemId> {
        self.position += 1;
        self.challenge = None;
        self.verdict = None;
        self.current_item()
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        let shown = (self.position + 1).min(self.queue.len());
        format!("Phrase {shown} of {}", self.queue.len())
    }

    #[must_use]
    pub fn score_label(&self) -> String {
        format!("{} of {} correct", self.correct, self.queue.len())
    }
}

#[must_use]
pub fn verdict_message(verdict: MatchVerdict) -> &'static str {
    match verdict {
        MatchVerdict::Correct => "Correct!",
        MatchVerdict::Incorrect => "Not quite. Try again.",
        MatchVerdict::Incomplete => "Use every word before checking.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kartuli_core::model::Item;

    fn challenge(id: u32) -> PhraseChallenge {
        let item = Item::new(ItemId::new(id), "რა გქვია?", "ra gkvia?", "What is your name?");
        PhraseChallenge::with_order(&item, &[1, 0])
    }

    #[test]
    fn counts_each_phrase_once() {
        let mut round = MatchRoundVm::new(vec![ItemId::new(11), ItemId::new(12)]);
        round.set_challenge(challenge(11));
        round.pick(1);
        round.pick(0);
        round.record(MatchVerdict::Correct);
        round.record(MatchVerdict::Correct);
        assert_eq!(round.score_label(), "1 of 2 correct");
    }

    #[test]
    fn editing_clears_verdict() {
        let mut round = MatchRoundVm::new(vec![ItemId::new(11)]);
        round.set_challenge(challenge(11));
        round.pick(0);
        round.record(MatchVerdict::Incomplete);
        round.unpick(0);
        assert_eq!(round.verdict(), None);
    }

    #[test]
    fn advance_walks_the_queue() {
        let mut round = MatchRoundVm::new(vec![ItemId::new(11), ItemId::new(12)]);
        assert_eq!(round.progress_label(), "Phrase 1 of 2");
        assert_eq!(round.advance(), Some(ItemId::new(12)));
        assert_eq!(round.progress_label(), "Phrase 2 of 2");
        assert_eq!(round.advance(), None);
        assert!(round.is_finished());
        assert_eq!(round.progress_label(), "Phrase 2 of 2");
    }
}
