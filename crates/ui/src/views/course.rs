use dioxus::prelude::*;
use dioxus_router::Link;
use kartuli_core::model::CourseId;
use services::{CourseServiceError, LevelOverview};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, course_id_from_route, view_state_from_resource};
use crate::vm::{CardSide, FlashcardDeckVm, lock_label};

#[derive(Clone, Debug, PartialEq)]
struct CourseData {
    id: CourseId,
    title: String,
    lock_label: Option<String>,
    supports_matching: bool,
    progress_label: String,
    levels: Vec<LevelOverview>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ResetState {
    Idle,
    Resetting,
    Error(ViewError),
}

fn map_service_error(err: &CourseServiceError) -> ViewError {
    match err {
        CourseServiceError::UnknownCourse(_) => ViewError::NotFound,
        _ => ViewError::Unknown,
    }
}

/// First unlocked level with something left to learn, else the first level.
fn default_level(levels: &[LevelOverview]) -> Option<u32> {
    levels
        .iter()
        .find(|level| level.unlock.is_unlocked && level.learned < level.total)
        .or_else(|| levels.first())
        .map(|level| level.number)
}

/// The selected level while it is still unlocked, else [`default_level`].
fn level_to_show(selected: Option<u32>, levels: &[LevelOverview]) -> Option<u32> {
    selected
        .filter(|number| {
            levels
                .iter()
                .any(|level| level.number == *number && level.unlock.is_unlocked)
        })
        .or_else(|| default_level(levels))
}

#[component]
pub fn CourseView(course_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let courses = ctx.courses();
    let courses_for_resource = courses.clone();
    let courses_for_effect = courses.clone();
    let selected_level = use_signal(|| None::<u32>);
    let mut deck = use_signal(|| None::<FlashcardDeckVm>);
    let action_error = use_signal(|| None::<ViewError>);
    let mut show_reset_modal = use_signal(|| false);
    let mut reset_state = use_signal(|| ResetState::Idle);

    let resource = use_resource(move || {
        let courses = courses_for_resource.clone();
        let course_id = course_id.clone();
        async move {
            let id = course_id_from_route(&course_id)?;
            if !courses.progress().is_hydrated() {
                courses.hydrate().await.map_err(|_| ViewError::Unknown)?;
            }
            let course = courses.course(&id).map_err(|err| map_service_error(&err))?;
            let overview = courses.overview(&id).map_err(|err| map_service_error(&err))?;
            let levels = courses
                .level_overviews(&id)
                .map_err(|err| map_service_error(&err))?;
            let progress_label = match overview.percentage {
                Some(pct) => format!("{} / {} learned · {pct}%", overview.learned, overview.total),
                None => String::new(),
            };
            Ok::<_, ViewError>(CourseData {
                title: course.title().to_string(),
                supports_matching: course.kind().supports_matching(),
                lock_label: lock_label(&overview.unlock),
                progress_label,
                levels,
                id,
            })
        }
    });

    use_effect(move || {
        let data = resource
            .value()
            .read()
            .as_ref()
            .and_then(|value| value.as_ref().ok())
            .cloned();
        let Some(data) = data else {
            return;
        };
        if data.lock_label.is_some() {
            return;
        }
        let selected = selected_level();
        let Some(level) = level_to_show(selected, &data.levels) else {
            return;
        };
        // A reset or unmark can relock the selected level.
        if selected.is_some_and(|number| number != level) {
            let mut selected_level = selected_level;
            selected_level.set(None);
        }
        let current = deck.peek().as_ref().map(FlashcardDeckVm::level);
        if current == Some(level) {
            return;
        }
        let Ok(course) = courses_for_effect.course(&data.id) else {
            return;
        };
        if let Some(found) = course.level(level) {
            let mut next = FlashcardDeckVm::new(found);
            next.skip_to_first_unlearned(|item| courses_for_effect.is_learned(&data.id, item));
            deck.set(Some(next));
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page course-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(ViewError::NotFound) => rsx! {
                    h2 { class: "view-title", {ViewError::NotFound.message()} }
                    Link { class: "btn btn-secondary", to: Route::Home {}, "Back to courses" }
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
                ViewState::Ready(data) => {
                    if let Some(label) = data.lock_label.clone() {
                        rsx! {
                            header { class: "view-header",
                                h2 { class: "view-title", "{data.title}" }
                            }
                            div { class: "locked-panel",
                                p { class: "course-lock", "{label}" }
                                Link { class: "btn btn-secondary", to: Route::Home {}, "Back to courses" }
                            }
                        }
                    } else {
                        let active_level = deck().as_ref().map(FlashcardDeckVm::level);
                        let level_tabs = data.levels.iter().map(|level| {
                            let number = level.number;
                            let unlocked = level.unlock.is_unlocked;
                            let hint = level
                                .unlock
                                .required_level
                                .map(|required| format!("Complete level {required} to unlock"));
                            let class = if active_level == Some(number) {
                                "level-tab level-tab--active"
                            } else {
                                "level-tab"
                            };
                            let mut selected_level = selected_level;
                            rsx! {
                                button {
                                    key: "{number}",
                                    class: class,
                                    r#type: "button",
                                    disabled: !unlocked,
                                    title: hint.clone().unwrap_or_default(),
                                    onclick: move |_| selected_level.set(Some(number)),
                                    span { class: "level-tab-title", "Level {number}: {level.title}" }
                                    span { class: "level-tab-count", "{level.learned} / {level.total}" }
                                }
                            }
                        });
                        let course_id_for_match = data.id.to_string();
                        rsx! {
                            header { class: "view-header",
                                h2 { class: "view-title", "{data.title}" }
                                p { class: "view-subtitle", "{data.progress_label}" }
                            }
                            div { class: "level-tabs", {level_tabs} }
                            div { class: "view-divider" }
                            FlashcardPanel {
                                course_id: data.id.clone(),
                                deck,
                                resource,
                                action_error,
                            }
                            if let Some(err) = action_error() {
                                p { class: "view-error", "{err.message()}" }
                            }
                            div { class: "course-actions",
                                if data.supports_matching {
                                    Link {
                                        class: "btn btn-primary",
                                        to: Route::Match { course_id: course_id_for_match },
                                        "Build sentences"
                                    }
                                }
                                button {
                                    class: "btn btn-danger",
                                    r#type: "button",
                                    onclick: move |_| {
                                        reset_state.set(ResetState::Idle);
                                        show_reset_modal.set(true);
                                    },
                                    "Reset progress"
                                }
                            }
                            if show_reset_modal() {
                                ResetModal {
                                    course_id: data.id.clone(),
                                    title: data.title.clone(),
                                    show: show_reset_modal,
                                    reset_state,
                                    resource,
                                    deck,
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FlashcardPanel(
    course_id: CourseId,
    deck: Signal<Option<FlashcardDeckVm>>,
    resource: Resource<Result<CourseData, ViewError>>,
    action_error: Signal<Option<ViewError>>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let courses = ctx.courses();
    let mut deck = deck;

    let Some(current_deck) = deck() else {
        return rsx! {
            p { "Loading..." }
        };
    };
    let Some(card) = current_deck.current().cloned() else {
        return rsx! {
            p { "This level has no cards." }
        };
    };
    let learned = courses.is_learned(&course_id, card.item_id);
    let item = card.item_id;
    let side = current_deck.side();

    rsx! {
        div { class: "flashcard-panel",
            p { class: "flashcard-position", "{current_deck.position_label()}" }
            button {
                class: if learned { "flashcard flashcard--learned" } else { "flashcard" },
                r#type: "button",
                onclick: move |_| {
                    deck.with_mut(|deck| {
                        if let Some(deck) = deck.as_mut() {
                            deck.flip();
                        }
                    });
                },
                match side {
                    CardSide::Front => rsx! {
                        span { class: "flashcard-georgian georgian", "{card.georgian}" }
                        span { class: "flashcard-hint", "Tap to reveal" }
                    },
                    CardSide::Back => rsx! {
                        span { class: "flashcard-georgian georgian", "{card.georgian}" }
                        span { class: "flashcard-transliteration", "{card.transliteration}" }
                        span { class: "flashcard-meaning", "{card.meaning}" }
                    },
                }
            }
            div { class: "flashcard-controls",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: !current_deck.has_previous(),
                    onclick: move |_| {
                        deck.with_mut(|deck| {
                            if let Some(deck) = deck.as_mut() {
                                deck.previous();
                            }
                        });
                    },
                    "Previous"
                }
                button {
                    class: if learned { "btn btn-secondary" } else { "btn btn-primary" },
                    r#type: "button",
                    onclick: move |_| {
                        let courses = courses.clone();
                        let course_id = course_id.clone();
                        let mut resource = resource;
                        let mut action_error = action_error;
                        spawn(async move {
                            let result = if learned {
                                courses.unmark_learned(&course_id, item).await
                            } else {
                                courses.mark_learned(&course_id, item).await
                            };
                            match result {
                                Ok(_) => {
                                    action_error.set(None);
                                    resource.restart();
                                }
                                Err(_) => action_error.set(Some(ViewError::Unknown)),
                            }
                        });
                    },
                    if learned { "Mark as not learned" } else { "Mark as learned" }
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: !current_deck.has_next(),
                    onclick: move |_| {
                        deck.with_mut(|deck| {
                            if let Some(deck) = deck.as_mut() {
                                deck.next();
                            }
                        });
                    },
                    "Next"
                }
            }
        }
    }
}

#[component]
fn ResetModal(
    course_id: CourseId,
    title: String,
    show: Signal<bool>,
    reset_state: Signal<ResetState>,
    resource: Resource<Result<CourseData, ViewError>>,
    deck: Signal<Option<FlashcardDeckVm>>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let courses = ctx.courses();
    let mut show = show;
    let mut reset_state = reset_state;

    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| {
                show.set(false);
                reset_state.set(ResetState::Idle);
            },
            div {
                class: "modal",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "modal-title", "Reset {title}?" }
                p { class: "modal-body",
                    "Every card in this course goes back to unlearned. Later courses may lock again."
                }
                if let ResetState::Error(err) = reset_state() {
                    p { class: "modal-error", "{err.message()}" }
                }
                div { class: "modal-actions",
                    button {
                        class: "btn modal-cancel",
                        r#type: "button",
                        onclick: move |_| {
                            show.set(false);
                            reset_state.set(ResetState::Idle);
                        },
                        "Cancel"
                    }
                    button {
                        class: "btn modal-confirm",
                        r#type: "button",
                        disabled: reset_state() == ResetState::Resetting,
                        onclick: move |_| {
                            let courses = courses.clone();
                            let course_id = course_id.clone();
                            let mut resource = resource;
                            let mut reset_state = reset_state;
                            let mut show = show;
                            let mut deck = deck;
                            spawn(async move {
                                reset_state.set(ResetState::Resetting);
                                match courses.reset(&course_id).await {
                                    Ok(()) => {
                                        reset_state.set(ResetState::Idle);
                                        show.set(false);
                                        deck.set(None);
                                        resource.restart();
                                    }
                                    Err(_) => {
                                        reset_state.set(ResetState::Error(ViewError::Unknown));
                                    }
                                }
                            });
                        },
                        "Reset"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kartuli_core::model::ItemId;
    use services::AppServices;
    use storage::repository::Storage;

    #[tokio::test]
    async fn relocked_selection_falls_back_to_open_level() {
        let services = AppServices::from_storage(&Storage::in_memory()).unwrap();
        let courses = services.courses();
        let alphabet = CourseId::new("alphabet").unwrap();
        courses.hydrate().await.unwrap();
        for item in 1..=11 {
            courses.mark_learned(&alphabet, ItemId::new(item)).await.unwrap();
        }

        let levels = courses.level_overviews(&alphabet).unwrap();
        assert_eq!(level_to_show(Some(2), &levels), Some(2));
        assert_eq!(level_to_show(Some(1), &levels), Some(1));
        assert_eq!(level_to_show(Some(3), &levels), Some(2));

        courses.reset(&alphabet).await.unwrap();
        let levels = courses.level_overviews(&alphabet).unwrap();
        assert_eq!(level_to_show(Some(2), &levels), Some(1));
        assert_eq!(level_to_show(None, &levels), Some(1));
    }
}
