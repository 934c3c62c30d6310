#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth;
pub mod course_service;
pub mod error;
pub mod matching_service;
pub mod progress_store;
pub mod settings_service;

pub use app_services::AppServices;
pub use auth::AuthFailure;
pub use course_service::{CourseOverview, CourseService, LevelOverview};
pub use error::{AppServicesError, CourseServiceError, ProgressError, SettingsError};
pub use matching_service::MatchingService;
pub use progress_store::{Hydration, ProgressStore};
pub use settings_service::SettingsService;
