use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{CourseCardVm, map_course_cards};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let courses = ctx.courses();
    let courses_for_resource = courses.clone();

    let resource = use_resource(move || {
        let courses = courses_for_resource.clone();
        async move {
            if !courses.progress().is_hydrated() {
                courses.hydrate().await.map_err(|_| ViewError::Unknown)?;
            }
            Ok::<_, ViewError>(map_course_cards(&courses.overviews()))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page home-page",
            header { class: "view-header",
                h2 { class: "view-title", "Courses" }
                p { class: "view-subtitle", "Finish a course to open the next one." }
            }
            div { class: "view-divider" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                // Progress is unknown while loading, so cards render without it.
                ViewState::Loading => rsx! {
                    CourseGrid { cards: map_course_cards(&courses.overviews()) }
                },
                ViewState::Ready(cards) => rsx! {
                    CourseGrid { cards }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
            }
        }
    }
}

#[component]
fn CourseGrid(cards: Vec<CourseCardVm>) -> Element {
    rsx! {
        ul { class: "course-grid",
            for card in cards {
                CourseCard { card }
            }
        }
    }
}

#[component]
fn CourseCard(card: CourseCardVm) -> Element {
    let class = if card.is_loading {
        "course-card course-card--loading"
    } else if card.is_unlocked {
        "course-card"
    } else {
        "course-card course-card--locked"
    };
    rsx! {
        li { class,
            if card.is_loading {
                div { class: "course-link",
                    CourseCardBody { card: card.clone() }
                }
            } else if card.is_unlocked {
                Link { class: "course-link", to: Route::Course { course_id: card.slug.clone() },
                    CourseCardBody { card: card.clone() }
                }
            } else {
                div { class: "course-link",
                    CourseCardBody { card: card.clone() }
                    if let Some(label) = card.lock_label.as_ref() {
                        p { class: "course-lock", "{label}" }
                    }
                }
            }
        }
    }
}

#[component]
fn CourseCardBody(card: CourseCardVm) -> Element {
    rsx! {
        span { class: "course-avatar georgian", "{card.avatar}" }
        div { class: "course-text",
            h3 { class: "course-title", "{card.title}" }
            p { class: "course-description", "{card.description}" }
            if let Some(label) = card.progress_label.as_ref() {
                p { class: "course-progress", "{label}" }
            }
            if let Some(pct) = card.percentage {
                div { class: "progress-bar",
                    div { class: "progress-bar-fill", style: "width: {pct}%;" }
                }
            }
        }
    }
}
