use serde::{Deserialize, Serialize};

/// Typeface used to render Georgian script on cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontPreference {
    System,
    #[default]
    NotoSansGeorgian,
    NotoSerifGeorgian,
}

impl FontPreference {
    pub const ALL: [FontPreference; 3] = [
        FontPreference::System,
        FontPreference::NotoSansGeorgian,
        FontPreference::NotoSerifGeorgian,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FontPreference::System => "System default",
            FontPreference::NotoSansGeorgian => "Noto Sans Georgian",
            FontPreference::NotoSerifGeorgian => "Noto Serif Georgian",
        }
    }

    /// CSS `font-family` stack for the preference.
    #[must_use]
    pub fn css_family(self) -> &'static str {
        match self {
            FontPreference::System => "system-ui, sans-serif",
            FontPreference::NotoSansGeorgian => "\"Noto Sans Georgian\", system-ui, sans-serif",
            FontPreference::NotoSerifGeorgian => "\"Noto Serif Georgian\", Georgia, serif",
        }
    }

    /// Stable key used in forms and persisted JSON.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            FontPreference::System => "system",
            FontPreference::NotoSansGeorgian => "noto-sans-georgian",
            FontPreference::NotoSerifGeorgian => "noto-serif-georgian",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pref| pref.key() == key)
    }
}
