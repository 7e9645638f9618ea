use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;
use vanguard_core::model::{FlatSection, SECTION_POINTS, SectionId};
use vanguard_core::visibility::{ObservationEntry, TrackerEffect, VisibilityTracker};

use crate::progress_store::ProgressStore;

/// Feeds observation batches through the visibility state machine and
/// applies the resulting progress effects to the store.
pub struct SectionTracker {
    tracker: Mutex<VisibilityTracker>,
    store: Arc<ProgressStore>,
}

impl SectionTracker {
    #[must_use]
    pub fn new(sections: &[FlatSection], store: Arc<ProgressStore>) -> Self {
        Self {
            tracker: Mutex::new(VisibilityTracker::new(sections)),
            store,
        }
    }

    /// Process one batch. Returns every effect, including the purely visual
    /// ones (`Activate`, `Reveal`) the caller renders.
    pub async fn observe(&self, batch: &[ObservationEntry]) -> Vec<TrackerEffect> {
        let snapshot = self.store.snapshot().await;
        let effects = {
            let mut tracker = self.tracker.lock().await;
            tracker.observe(batch, |id| snapshot.is_section_complete(id))
        };

        for effect in &effects {
            match effect {
                TrackerEffect::UpdateLastViewed(id) => {
                    self.store.update_last_viewed_section(id.clone()).await;
                }
                TrackerEffect::CompleteSection(id) => {
                    let awarded = self
                        .store
                        .complete_section(id.clone(), SECTION_POINTS)
                        .await;
                    debug!(section = %id, awarded, "section entered trigger band");
                }
                TrackerEffect::Activate(_) | TrackerEffect::Reveal(_) => {}
            }
        }
        effects
    }

    /// The host observer was re-attached.
    pub async fn resubscribe(&self) {
        self.tracker.lock().await.resubscribe();
    }

    /// Call after `ProgressStore::reset_progress`.
    pub async fn on_progress_reset(&self) {
        self.tracker.lock().await.on_progress_reset();
    }

    pub async fn active_section(&self) -> SectionId {
        self.tracker.lock().await.active_section().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;

    fn flat(ids: &[&str]) -> Vec<FlatSection> {
        ids.iter()
            .map(|id| FlatSection {
                id: SectionId::from(*id),
                title: (*id).to_owned(),
                parent_title: None,
                depth: 0,
            })
            .collect()
    }

    #[tokio::test]
    async fn steady_state_batch_updates_store() {
        let store = Arc::new(ProgressStore::load(Arc::new(InMemoryRepository::new())).await);
        let tracker = SectionTracker::new(&flat(&["overview", "1-1"]), Arc::clone(&store));
        tracker.observe(&[ObservationEntry::new("overview", false)]).await;
        tracker.observe(&[ObservationEntry::new("1-1", true)]).await;

        let user = store.snapshot().await;
        assert_eq!(user.points(), SECTION_POINTS);
        assert_eq!(user.last_viewed_section(), &SectionId::from("1-1"));
        assert_eq!(tracker.active_section().await, SectionId::from("1-1"));
    }

    #[tokio::test]
    async fn already_completed_sections_award_nothing() {
        let store = Arc::new(ProgressStore::load(Arc::new(InMemoryRepository::new())).await);
        store.complete_section(SectionId::from("1-1"), SECTION_POINTS).await;
        let tracker = SectionTracker::new(&flat(&["overview", "1-1"]), Arc::clone(&store));
        tracker.observe(&[]).await;
        let effects = tracker.observe(&[ObservationEntry::new("1-1", true)]).await;
        assert!(!effects.iter().any(|e| matches!(e, TrackerEffect::CompleteSection(_))));
        assert_eq!(store.snapshot().await.points(), SECTION_POINTS);
    }
}
