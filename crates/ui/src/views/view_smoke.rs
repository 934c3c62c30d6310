use std::sync::Arc;

use kartuli_core::model::{CourseId, FontPreference, ItemId};
use storage::repository::{KeyValueStore, Storage, StorageError};

use super::test_harness::{
    ViewKind, complete_course, setup_view_harness, setup_view_harness_with_storage,
};

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_courses_and_locks() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness.settle().await;
    let html = harness.render();
    for title in ["Alphabet", "Numbers", "Greetings"] {
        assert!(html.contains(title), "missing {title} in {html}");
    }
    assert!(html.contains("0 / 33 learned"), "missing progress in {html}");
    assert!(
        html.contains("Complete Alphabet to unlock"),
        "missing lock prompt in {html}"
    );
    assert!(html.contains("Complete Numbers to unlock"), "missing lock prompt in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_reflects_completed_course() {
    let mut harness = setup_view_harness(ViewKind::Home);
    complete_course(&harness.services, "alphabet").await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("33 / 33 learned"), "missing completion in {html}");
    assert!(html.contains("100%"), "missing percentage in {html}");
    assert!(
        !html.contains("Complete Alphabet to unlock"),
        "numbers should be unlocked in {html}"
    );
}

struct FailingStore;

#[async_trait::async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_error_state() {
    let storage = Storage {
        kv: Arc::new(FailingStore),
    };
    let mut harness = setup_view_harness_with_storage(ViewKind::Home, &storage);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn course_view_smoke_renders_first_card() {
    let mut harness = setup_view_harness(ViewKind::Course("alphabet"));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Tap to reveal"), "missing card face in {html}");
    assert!(html.contains("1 / 11"), "missing position in {html}");
    assert!(html.contains("Mark as learned"), "missing action in {html}");
    assert!(
        !html.contains("Build sentences"),
        "alphabet has no sentence game in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn course_view_smoke_opens_next_level_after_first_is_learned() {
    let mut harness = setup_view_harness(ViewKind::Course("alphabet"));
    let courses = harness.services.courses();
    let alphabet = CourseId::new("alphabet").unwrap();
    courses.hydrate().await.unwrap();
    for item in 1..=11 {
        courses.mark_learned(&alphabet, ItemId::new(item)).await.unwrap();
    }

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("11 / 11"), "missing level one count in {html}");
    assert!(html.contains("Mark as learned"), "expected an unlearned card in {html}");
    assert!(
        !html.contains("Mark as not learned"),
        "deck stayed on the finished level in {html}"
    );
    assert!(
        html.contains("Complete level 2 to unlock"),
        "missing level lock hint in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn course_view_smoke_relocks_levels_after_reset() {
    let storage = Storage::in_memory();
    let mut harness = setup_view_harness_with_storage(ViewKind::Course("alphabet"), &storage);
    let courses = harness.services.courses();
    let alphabet = CourseId::new("alphabet").unwrap();
    courses.hydrate().await.unwrap();
    for item in 1..=11 {
        courses.mark_learned(&alphabet, ItemId::new(item)).await.unwrap();
    }
    harness.settle().await;
    assert!(harness.render().contains("Complete level 2 to unlock"));

    courses.reset(&alphabet).await.unwrap();
    let mut reopened = setup_view_harness_with_storage(ViewKind::Course("alphabet"), &storage);
    reopened.settle().await;
    let html = reopened.render();
    assert!(html.contains("Complete level 1 to unlock"), "level two still open in {html}");
    assert!(html.contains("0 / 11"), "missing reset count in {html}");
    assert!(!html.contains("Mark as not learned"), "stale learned card in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn course_view_smoke_renders_locked_course() {
    let mut harness = setup_view_harness(ViewKind::Course("numbers"));
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Complete Alphabet to unlock"),
        "missing lock prompt in {html}"
    );
    assert!(!html.contains("Mark as learned"), "locked course shows cards in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn course_view_smoke_renders_not_found() {
    let mut harness = setup_view_harness(ViewKind::Course("klingon"));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Course not found."), "missing not found in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn match_view_smoke_deals_first_phrase() {
    let mut harness = setup_view_harness(ViewKind::Match("greetings"));
    complete_course(&harness.services, "alphabet").await;
    complete_course(&harness.services, "numbers").await;

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Phrase 1 of 6"), "missing progress in {html}");
    assert!(html.contains("Good morning"), "missing prompt in {html}");
    assert!(html.contains("მშვიდობისა"), "missing tile in {html}");
    assert!(html.contains("Check"), "missing check button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn match_view_smoke_respects_course_lock() {
    let mut harness = setup_view_harness(ViewKind::Match("greetings"));
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Complete Numbers to unlock"),
        "missing lock prompt in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn match_view_smoke_rejects_non_phrase_course() {
    let mut harness = setup_view_harness(ViewKind::Match("alphabet"));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Course not found."), "missing not found in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn settings_view_smoke_renders_font_options() {
    let mut harness = setup_view_harness(ViewKind::Settings);
    harness
        .services
        .settings()
        .set_font_preference(FontPreference::NotoSerifGeorgian)
        .await
        .unwrap();

    harness.settle().await;
    let html = harness.render();
    for font in FontPreference::ALL {
        assert!(html.contains(font.label()), "missing {} in {html}", font.label());
    }
    assert!(
        html.contains("font-option font-option--active"),
        "missing active option in {html}"
    );
}
