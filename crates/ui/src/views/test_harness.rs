use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use kartuli_core::model::{CourseId, ItemId};
use services::{AppServices, CourseService, MatchingService, SettingsService};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::{CourseView, HomeView, MatchView, SettingsView};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn courses(&self) -> Arc<CourseService> {
        self.services.courses()
    }

    fn matching(&self) -> Arc<MatchingService> {
        self.services.matching()
    }

    fn settings(&self) -> Arc<SettingsService> {
        self.services.settings()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Course(&'static str),
    Match(&'static str),
    Settings,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Course(slug) => rsx! { CourseView { course_id: slug.to_string() } },
        ViewKind::Match(slug) => rsx! { MatchView { course_id: slug.to_string() } },
        ViewKind::Settings => rsx! { SettingsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let resources and the effects they trigger finish.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_storage(view, &Storage::in_memory())
}

pub fn setup_view_harness_with_storage(view: ViewKind, storage: &Storage) -> ViewHarness {
    let services = AppServices::from_storage(storage).expect("builtin catalog");
    let app = Arc::new(TestApp {
        services: services.clone(),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom, services }
}

/// Mark every item of `course` learned.
pub async fn complete_course(services: &AppServices, slug: &str) {
    let courses = services.courses();
    let id = CourseId::new(slug).expect("course id");
    courses.hydrate().await.expect("hydrate");
    let items: Vec<ItemId> = courses
        .course(&id)
        .expect("course")
        .items()
        .map(|item| item.id())
        .collect();
    for item in items {
        courses.mark_learned(&id, item).await.expect("mark learned");
    }
}
