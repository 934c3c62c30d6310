use dioxus::prelude::*;
use dioxus_router::Router;
use kartuli_core::model::FontPreference;

use crate::context::AppContext;
use crate::routes::Route;

/// Font chosen in settings, shared so a change restyles the whole window.
#[derive(Clone, Copy)]
pub struct FontSignal(pub Signal<FontPreference>);

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let settings = ctx.settings();
    let font = use_signal(FontPreference::default);
    use_context_provider(|| FontSignal(font));

    use_future(move || {
        let settings = settings.clone();
        let mut font = font;
        async move {
            if let Ok(preference) = settings.font_preference().await {
                font.set(preference);
            }
        }
    });

    let family = font().css_family();

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title. Per-route titles are rendered inside the right pane.
        document::Title { "Kartuli" }

        div { class: "app-root", style: "--georgian-font: {family};",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
