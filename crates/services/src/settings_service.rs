use std::sync::Arc;

use kartuli_core::model::FontPreference;
use storage::keys::FONT_PREFERENCE_KEY;
use storage::repository::{KeyValueStore, StorageError};

use crate::error::SettingsError;

#[derive(Clone)]
pub struct SettingsService {
    kv: Arc<dyn KeyValueStore>,
}

impl SettingsService {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Load the persisted font preference (or the default if missing or unreadable).
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` on storage failures.
    pub async fn font_preference(&self) -> Result<FontPreference, SettingsError> {
        let Some(raw) = self.kv.get(FONT_PREFERENCE_KEY).await? else {
            return Ok(FontPreference::default());
        };
        Ok(serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring malformed font preference");
            FontPreference::default()
        }))
    }

    /// Persist a new font preference.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if persistence fails.
    pub async fn set_font_preference(&self, font: FontPreference) -> Result<(), SettingsError> {
        let json = serde_json::to_string(&font)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.kv.set(FONT_PREFERENCE_KEY, &json).await?;
        Ok(())
    }
}
