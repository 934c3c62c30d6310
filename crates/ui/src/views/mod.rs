mod course;
mod home;
mod matching;
mod settings;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use course::CourseView;
pub use home::HomeView;
pub use matching::MatchView;
pub use settings::SettingsView;
pub use state::{ViewError, ViewState, course_id_from_route, view_state_from_resource};
