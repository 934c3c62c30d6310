use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Slug identifying a course (`alphabet`, `numbers`, ...).
///
/// Appears in routes and storage keys, so it is restricted to lowercase ASCII
/// letters, digits and `-`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseId(String);

impl CourseId {
    /// Creates a validated `CourseId`.
    ///
    /// # Errors
    ///
    /// Returns `ParseIdError` if the slug is empty or contains characters
    /// outside `[a-z0-9-]`.
    pub fn new(slug: impl Into<String>) -> Result<Self, ParseIdError> {
        let slug = slug.into();
        let valid = !slug.is_empty()
            && slug
                .chars()
                .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-');
        if !valid {
            return Err(ParseIdError {
                kind: "CourseId".to_string(),
            });
        }
        Ok(Self(slug))
    }

    /// Builds a `CourseId` from a slug known to be valid at compile time.
    pub(crate) fn from_static(slug: &'static str) -> Self {
        debug_assert!(Self::new(slug).is_ok(), "invalid built-in slug {slug}");
        Self(slug.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CourseId {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CourseId> for String {
    fn from(value: CourseId) -> Self {
        value.0
    }
}

/// Identifier of a learnable item, unique within its course.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    /// Creates a new `ItemId`
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CourseId({})", self.0)
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for CourseId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}

impl FromStr for ItemId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(ItemId::new).map_err(|_| ParseIdError {
            kind: "ItemId".to_string(),
        })
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_id_accepts_slugs() {
        let id: CourseId = "cafe-phrases".parse().unwrap();
        assert_eq!(id.as_str(), "cafe-phrases");
        assert_eq!(id.to_string(), "cafe-phrases");
    }

    #[test]
    fn course_id_rejects_empty_and_uppercase() {
        assert!(CourseId::new("").is_err());
        assert!(CourseId::new("Alphabet").is_err());
        assert!(CourseId::new("learned:items").is_err());
    }

    #[test]
    fn course_id_deserialize_validates() {
        let ok: CourseId = serde_json::from_str("\"numbers\"").unwrap();
        assert_eq!(ok.as_str(), "numbers");
        assert!(serde_json::from_str::<CourseId>("\"No Way\"").is_err());
    }

    #[test]
    fn item_id_from_str() {
        let id: ItemId = "12".parse().unwrap();
        assert_eq!(id, ItemId::new(12));
        assert!("twelve".parse::<ItemId>().is_err());
    }

    #[test]
    fn item_id_serializes_as_plain_integer() {
        let json = serde_json::to_string(&ItemId::new(5)).unwrap();
        assert_eq!(json, "5");
    }
}
