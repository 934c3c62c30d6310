//! Names of the persisted values.

use kartuli_core::model::CourseId;

/// Prefix shared by every learned-items entry.
const LEARNED_ITEMS_PREFIX: &str = "learned-items:";

/// Key holding the JSON-encoded font preference.
pub const FONT_PREFERENCE_KEY: &str = "font-preference";

/// Key holding the JSON array of learned item ids for `course`.
#[must_use]
pub fn learned_items_key(course: &CourseId) -> String {
    format!("{LEARNED_ITEMS_PREFIX}{course}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn learned_key_embeds_course_slug() {
        let course = CourseId::new("numbers").unwrap();
        assert_eq!(learned_items_key(&course), "learned-items:numbers");
        assert!(learned_items_key(&course).starts_with(LEARNED_ITEMS_PREFIX));
        assert_ne!(learned_items_key(&course), FONT_PREFERENCE_KEY);
    }
}
