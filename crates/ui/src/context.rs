use std::sync::Arc;

use services::{CourseService, MatchingService, SettingsService};

pub trait UiApp: Send + Sync {
    fn courses(&self) -> Arc<CourseService>;
    fn matching(&self) -> Arc<MatchingService>;
    fn settings(&self) -> Arc<SettingsService>;
}

#[derive(Clone)]
pub struct AppContext {
    courses: Arc<CourseService>,
    matching: Arc<MatchingService>,
    settings: Arc<SettingsService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            courses: app.courses(),
            matching: app.matching(),
            settings: app.settings(),
        }
    }

    #[must_use]
    pub fn courses(&self) -> Arc<CourseService> {
        Arc::clone(&self.courses)
    }

    #[must_use]
    pub fn matching(&self) -> Arc<MatchingService> {
        Arc::clone(&self.matching)
    }

    #[must_use]
    pub fn settings(&self) -> Arc<SettingsService> {
        Arc::clone(&self.settings)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
