use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use services::{AppServices, Clock, ProgressEvent, ProgressStore};
use services::ai::AiConfig;
use storage::repository::{
    InMemoryRepository, ProgressRepository, Storage, StorageError, USER_RECORD_KEY,
};
use storage::DecodedUser;
use vanguard_core::model::{SECTION_POINTS, SectionId, UserProgress};
use vanguard_core::time::fixed_now;
use vanguard_core::visibility::{LayoutObserver, ObservationEntry, SectionLayout, TriggerBand};

/// Backend that is always unavailable.
struct BrokenRepository {
    saves: AtomicUsize,
}

#[async_trait]
impl ProgressRepository for BrokenRepository {
    async fn load_user(&self) -> Result<Option<DecodedUser>, StorageError> {
        Err(StorageError::Connection("disk unavailable".into()))
    }

    async fn save_user(&self, _user: &UserProgress) -> Result<(), StorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Connection("disk unavailable".into()))
    }
}

async fn services_over(repo: InMemoryRepository) -> AppServices {
    AppServices::from_storage(
        Storage::from_repository(repo),
        Clock::fixed(fixed_now()),
        AiConfig::default(),
    )
    .await
    .expect("services")
}

#[tokio::test]
async fn fresh_load_then_scroll_into_lesson_awards_once() {
    let repo = InMemoryRepository::new();
    let services = services_over(repo.clone()).await;
    let store = services.progress();

    let user = store.snapshot().await;
    assert_eq!(user.points(), 0);
    assert!(user.completed_sections().is_empty());
    assert_eq!(user.last_viewed_section(), &SectionId::root());
    assert!(repo.raw(USER_RECORD_KEY).is_some());

    let tracker = services.section_tracker();
    tracker
        .observe(&[
            ObservationEntry::new("overview", false),
            ObservationEntry::new("1-1", false),
        ])
        .await;

    tracker.observe(&[ObservationEntry::new("1-1", true)]).await;
    let user = store.snapshot().await;
    assert_eq!(user.completed_sections().iter().collect::<Vec<_>>(), [&SectionId::from("1-1")]);
    assert_eq!(user.points(), SECTION_POINTS);

    tracker.observe(&[ObservationEntry::new("1-1", false)]).await;
    tracker.observe(&[ObservationEntry::new("1-1", true)]).await;
    let user = store.snapshot().await;
    assert_eq!(user.completed_sections().len(), 1);
    assert_eq!(user.points(), SECTION_POINTS);
}

#[tokio::test]
async fn section_already_in_band_at_mount_is_completed_without_scroll() {
    let services = services_over(InMemoryRepository::new()).await;
    let tracker = services.section_tracker();

    // Overview scrolled off above; "ai-models" fills the band.
    let layouts = vec![
        SectionLayout { id: "overview".into(), top: -900.0, bottom: -100.0 },
        SectionLayout { id: "ai-models".into(), top: -100.0, bottom: 900.0 },
        SectionLayout { id: "module-1".into(), top: 900.0, bottom: 1400.0 },
    ];
    let mut observer = LayoutObserver::new(TriggerBand::default());
    tracker.observe(&observer.poll(&layouts, 1000.0)).await;

    assert_eq!(tracker.active_section().await, SectionId::from("ai-models"));
    let user = services.progress().snapshot().await;
    assert!(user.is_section_complete(&SectionId::from("ai-models")));
    assert_eq!(user.points(), SECTION_POINTS);
}

#[tokio::test]
async fn reset_clears_everything_and_sections_can_be_earned_again() {
    let services = services_over(InMemoryRepository::new()).await;
    let store = services.progress();
    let tracker = services.section_tracker();
    let mut events = store.subscribe();

    tracker.observe(&[]).await;
    tracker.observe(&[ObservationEntry::new("1-2", true)]).await;
    store.reset_progress().await;
    tracker.on_progress_reset().await;

    let user = store.snapshot().await;
    assert_eq!(user.points(), 0);
    assert!(user.completed_sections().is_empty());
    assert!(user.completed_interactives().is_empty());
    assert_eq!(user.last_viewed_section(), &SectionId::root());

    let mut saw_reset = false;
    while let Ok(event) = events.try_recv() {
        saw_reset |= event == ProgressEvent::Reset;
    }
    assert!(saw_reset);

    tracker.observe(&[ObservationEntry::new("1-2", true)]).await;
    assert_eq!(store.snapshot().await.points(), SECTION_POINTS);
}

#[tokio::test]
async fn unavailable_storage_falls_back_to_memory() {
    let repo = Arc::new(BrokenRepository {
        saves: AtomicUsize::new(0),
    });
    let store = ProgressStore::load(repo.clone()).await;
    assert_eq!(store.snapshot().await, UserProgress::default());
    assert_eq!(repo.saves.load(Ordering::SeqCst), 0);

    assert_eq!(store.complete_section(SectionId::from("1-1"), 10).await, 10);
    assert_eq!(store.snapshot().await.points(), 10);
    assert_eq!(repo.saves.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn older_record_is_patched_and_rewritten() {
    let repo = InMemoryRepository::new().with_raw(
        USER_RECORD_KEY,
        r#"{"email":"user@example.com","name":"Zen Vanguard","picture":"","points":30,
            "progress":{"completedSections":["overview","ai-models","module-1"],
            "completedInteractives":[]}}"#,
    );
    let services = services_over(repo.clone()).await;
    let user = services.progress().snapshot().await;
    assert_eq!(user.points(), 30);
    assert_eq!(user.last_viewed_section(), &SectionId::root());
    assert!(repo.raw(USER_RECORD_KEY).unwrap().contains("\"lastViewedSection\":\"overview\""));
}

#[tokio::test]
async fn unreadable_record_is_replaced_with_defaults() {
    let repo = InMemoryRepository::new().with_raw(USER_RECORD_KEY, "undefined");
    let services = services_over(repo.clone()).await;
    assert_eq!(services.progress().snapshot().await, UserProgress::default());
    assert!(repo.raw(USER_RECORD_KEY).unwrap().starts_with('{'));
}

#[tokio::test]
async fn unopenable_database_falls_back_to_memory() {
    let services = AppServices::new_sqlite(
        "sqlite:///nonexistent-vanguard-dir/nested/progress.sqlite3",
        Clock::fixed(fixed_now()),
        AiConfig::default(),
    )
    .await
    .expect("services start without a database");

    let store = services.progress();
    assert_eq!(store.snapshot().await, UserProgress::default());
    assert_eq!(
        store.complete_section(SectionId::from("1-1"), SECTION_POINTS).await,
        SECTION_POINTS
    );
    assert!(store.snapshot().await.is_section_complete(&SectionId::from("1-1")));
}
