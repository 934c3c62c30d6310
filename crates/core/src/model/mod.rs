mod course;
mod font;
mod ids;

pub use course::{Course, CourseError, CourseKind, Item, Level};
pub use font::FontPreference;
pub use ids::{CourseId, ItemId, ParseIdError};
