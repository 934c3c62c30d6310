use dioxus::prelude::*;
use kartuli_core::model::FontPreference;

use crate::app::FontSignal;
use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SaveState {
    Idle,
    Saving,
    Saved,
    Error(ViewError),
}

#[component]
pub fn SettingsView() -> Element {
    let ctx = use_context::<AppContext>();
    let settings = ctx.settings();
    let settings_for_resource = settings.clone();
    let font_signal = try_use_context::<FontSignal>();
    let selected = use_signal(|| None::<FontPreference>);
    let save_state = use_signal(|| SaveState::Idle);

    let resource = use_resource(move || {
        let settings = settings_for_resource.clone();
        async move {
            settings
                .font_preference()
                .await
                .map_err(|_| ViewError::Unknown)
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page settings-page",
            header { class: "view-header",
                h2 { class: "view-title", "Settings" }
                p { class: "view-subtitle", "Choose how Georgian text is displayed." }
            }
            div { class: "view-divider" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
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
                ViewState::Ready(stored) => {
                    let active = selected().unwrap_or(stored);
                    let options = FontPreference::ALL.into_iter().map(|font| {
                        let settings = settings.clone();
                        let mut selected = selected;
                        let family = font.css_family();
                        rsx! {
                            label {
                                key: "{font.key()}",
                                class: if font == active { "font-option font-option--active" } else { "font-option" },
                                input {
                                    r#type: "radio",
                                    name: "font-preference",
                                    value: font.key(),
                                    checked: font == active,
                                    onchange: move |_| {
                                        let settings = settings.clone();
                                        let mut save_state = save_state;
                                        selected.set(Some(font));
                                        spawn(async move {
                                            save_state.set(SaveState::Saving);
                                            match settings.set_font_preference(font).await {
                                                Ok(()) => {
                                                    if let Some(FontSignal(mut signal)) = font_signal {
                                                        signal.set(font);
                                                    }
                                                    save_state.set(SaveState::Saved);
                                                }
                                                Err(_) => save_state.set(SaveState::Error(ViewError::Unknown)),
                                            }
                                        });
                                    },
                                }
                                span { class: "font-option-label", "{font.label()}" }
                                span { class: "font-option-sample georgian", style: "font-family: {family};",
                                    "ქართული ანბანი"
                                }
                            }
                        }
                    });
                    rsx! {
                        fieldset { class: "settings-section",
                            legend { "Georgian font" }
                            {options}
                        }
                        match save_state() {
                            SaveState::Idle => rsx! {},
                            SaveState::Saving => rsx! {
                                p { class: "view-hint", "Saving..." }
                            },
                            SaveState::Saved => rsx! {
                                p { class: "view-hint", "Saved." }
                            },
                            SaveState::Error(err) => rsx! {
                                p { class: "view-error", "{err.message()}" }
                            },
                        }
                    }
                }
            }
        }
    }
}
