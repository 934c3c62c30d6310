use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{CourseView, HomeView, MatchView, SettingsView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/course/:course_id", CourseView)] Course { course_id: String },
        #[route("/course/:course_id/match", MatchView)] Match { course_id: String },
        #[route("/settings", SettingsView)] Settings {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { class: "georgian", "ქართული" }
            ul {
                li { Link { to: Route::Home {}, "Courses" } }
                li { Link { to: Route::Settings {}, "Settings" } }
            }
        }
    }
}
