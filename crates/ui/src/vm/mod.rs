mod course_vm;
mod flashcard_vm;
mod match_vm;

pub use course_vm::{CourseCardVm, lock_label, map_course_card, map_course_cards};
pub use flashcard_vm::{CardFaceVm, CardSide, FlashcardDeckVm};
pub use match_vm::{MatchRoundVm, verdict_message};
