use dioxus::prelude::*;
use dioxus_router::Link;
use kartuli_core::matching::MatchVerdict;
use kartuli_core::model::{CourseId, ItemId};
use services::CourseServiceError;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, course_id_from_route, view_state_from_resource};
use crate::vm::{MatchRoundVm, lock_label, verdict_message};

#[derive(Clone, Debug, PartialEq)]
struct MatchData {
    id: CourseId,
    title: String,
    lock_label: Option<String>,
    queue: Vec<ItemId>,
}

fn map_service_error(err: &CourseServiceError) -> ViewError {
    match err {
        CourseServiceError::UnknownCourse(_) | CourseServiceError::MatchingUnsupported(_) => {
            ViewError::NotFound
        }
        _ => ViewError::Unknown,
    }
}

#[component]
pub fn MatchView(course_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let courses = ctx.courses();
    let matching = ctx.matching();
    let matching_for_effect = matching.clone();
    let mut round = use_signal(|| None::<MatchRoundVm>);
    let mut submit_error = use_signal(|| None::<ViewError>);

    let resource = use_resource(move || {
        let courses = courses.clone();
        let matching = matching.clone();
        let course_id = course_id.clone();
        async move {
            let id = course_id_from_route(&course_id)?;
            if !courses.progress().is_hydrated() {
                courses.hydrate().await.map_err(|_| ViewError::Unknown)?;
            }
            let queue = matching
                .playable_items(&id)
                .map_err(|err| map_service_error(&err))?;
            let overview = courses.overview(&id).map_err(|err| map_service_error(&err))?;
            Ok::<_, ViewError>(MatchData {
                id,
                title: overview.title.clone(),
                lock_label: lock_label(&overview.unlock),
                queue,
            })
        }
    });

    // Start a round once the queue is known, and deal the first phrase.
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
        if data.lock_label.is_some() || round.read().is_some() {
            return;
        }
        let mut next = MatchRoundVm::new(data.queue.clone());
        if let Some(item) = next.current_item() {
            match matching_for_effect.challenge(&data.id, item) {
                Ok(challenge) => next.set_challenge(challenge),
                Err(_) => submit_error.set(Some(ViewError::Unknown)),
            }
        }
        round.set(Some(next));
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page match-page",
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
                ViewState::Ready(data) => rsx! {
                    header { class: "view-header",
                        h2 { class: "view-title", "{data.title}" }
                        p { class: "view-subtitle", "Tap the words in the right order." }
                    }
                    div { class: "view-divider" }
                    if let Some(label) = data.lock_label.as_ref() {
                        div { class: "locked-panel",
                            p { class: "course-lock", "{label}" }
                            Link { class: "btn btn-secondary", to: Route::Home {}, "Back to courses" }
                        }
                    } else if data.queue.is_empty() {
                        p { "This course has no phrases to build yet." }
                    } else {
                        MatchBoard { course_id: data.id.clone(), round, submit_error }
                    }
                },
            }
        }
    }
}

#[component]
fn MatchBoard(
    course_id: CourseId,
    round: Signal<Option<MatchRoundVm>>,
    submit_error: Signal<Option<ViewError>>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let matching = ctx.matching();
    let matching_for_next = matching.clone();
    let course_id_for_next = course_id.clone();
    let course_id_for_back = course_id.to_string();
    let mut round = round;
    let mut submit_error = submit_error;

    let Some(current) = round() else {
        return rsx! {
            p { "Loading..." }
        };
    };

    if current.is_finished() {
        return rsx! {
            div { class: "match-finished",
                h3 { "Round complete" }
                p { class: "match-score", "{current.score_label()}" }
                div { class: "match-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| round.set(None),
                        "Play again"
                    }
                    Link {
                        class: "btn btn-secondary",
                        to: Route::Course { course_id: course_id_for_back.clone() },
                        "Back to cards"
                    }
                }
            }
        };
    }

    let Some(challenge) = current.challenge().cloned() else {
        return rsx! {
            p { "Loading..." }
        };
    };
    let verdict = current.verdict();
    let solved = verdict == Some(MatchVerdict::Correct);
    let prompt = challenge.prompt().to_string();
    let picked: Vec<(usize, String)> = challenge
        .picked()
        .enumerate()
        .map(|(position, tile)| (position, tile.text.clone()))
        .collect();
    let available: Vec<(usize, String)> = challenge
        .available()
        .map(|tile| (tile.index, tile.text.clone()))
        .collect();

    rsx! {
        div { class: "match-board",
            p { class: "match-progress", "{current.progress_label()}" }
            p { class: "match-prompt", "{prompt}" }

            div { class: "match-answer georgian",
                if picked.is_empty() {
                    span { class: "match-placeholder", "Your sentence" }
                }
                for (position, text) in picked {
                    button {
                        key: "picked-{position}",
                        class: "word-tile word-tile--picked",
                        r#type: "button",
                        disabled: solved,
                        onclick: move |_| {
                            round.with_mut(|round| {
                                if let Some(round) = round.as_mut() {
                                    round.unpick(position);
                                }
                            });
                        },
                        "{text}"
                    }
                }
            }

            div { class: "match-tray georgian",
                for (index, text) in available {
                    button {
                        key: "tile-{index}",
                        class: "word-tile",
                        r#type: "button",
                        disabled: solved,
                        onclick: move |_| {
                            round.with_mut(|round| {
                                if let Some(round) = round.as_mut() {
                                    round.pick(index);
                                }
                            });
                        },
                        "{text}"
                    }
                }
            }

            if let Some(verdict) = verdict {
                p {
                    class: if solved { "match-verdict match-verdict--correct" } else { "match-verdict" },
                    {verdict_message(verdict)}
                }
            }
            if let Some(err) = submit_error() {
                p { class: "view-error", "{err.message()}" }
            }

            div { class: "match-actions",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: solved,
                    onclick: move |_| {
                        round.with_mut(|round| {
                            if let Some(round) = round.as_mut() {
                                round.clear();
                            }
                        });
                    },
                    "Clear"
                }
                if solved {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut next = None;
                            round.with_mut(|round| {
                                if let Some(round) = round.as_mut() {
                                    next = round.advance();
                                }
                            });
                            if let Some(item) = next {
                                match matching_for_next.challenge(&course_id_for_next, item) {
                                    Ok(challenge) => round.with_mut(|round| {
                                        if let Some(round) = round.as_mut() {
                                            round.set_challenge(challenge);
                                        }
                                    }),
                                    Err(_) => submit_error.set(Some(ViewError::Unknown)),
                                }
                            }
                        },
                        "Next"
                    }
                } else {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| {
                            let matching = matching.clone();
                            let course_id = course_id.clone();
                            let challenge = challenge.clone();
                            let mut round = round;
                            let mut submit_error = submit_error;
                            spawn(async move {
                                match matching.submit(&course_id, &challenge).await {
                                    Ok(verdict) => {
                                        submit_error.set(None);
                                        round.with_mut(|round| {
                                            if let Some(round) = round.as_mut() {
                                                round.record(verdict);
                                            }
                                        });
                                    }
                                    Err(_) => submit_error.set(Some(ViewError::Unknown)),
                                }
                            });
                        },
                        "Check"
                    }
                }
            }
        }
    }
}
