use std::sync::Arc;

use storage::RecordStatus;
use storage::repository::ProgressRepository;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info, warn};
use vanguard_core::model::{InteractiveId, ProgressError, SectionId, UserProgress};

const EVENT_CAPACITY: usize = 64;

/// Change notifications for subscribers such as the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    PointsAdded { amount: u32, total: u32 },
    SectionCompleted(SectionId),
    InteractiveCompleted(InteractiveId),
    LastViewedChanged(SectionId),
    Reset,
}

/// Single writer of the persisted user record.
///
/// Every mutation runs against the current in-memory record under one lock
/// and persists before the lock is released, so concurrent callers never
/// build on a stale snapshot. Persistence failures are logged and otherwise
/// ignored; the in-memory record stays authoritative for the session.
pub struct ProgressStore {
    state: Mutex<UserProgress>,
    repo: Arc<dyn ProgressRepository>,
    events: broadcast::Sender<ProgressEvent>,
}

impl ProgressStore {
    /// Load the stored record, writing defaults or a patched copy back when
    /// needed. Never fails: an unreadable backend yields a default record.
    pub async fn load(repo: Arc<dyn ProgressRepository>) -> Self {
        let (user, rewrite) = match repo.load_user().await {
            Ok(Some(decoded)) => {
                match &decoded.status {
                    RecordStatus::Intact => {}
                    RecordStatus::Patched { missing } => {
                        info!(?missing, "patched stored user record with defaults");
                    }
                    RecordStatus::Malformed => {
                        warn!("stored user record is unreadable; replacing with defaults");
                    }
                }
                let rewrite = decoded.status.needs_rewrite();
                (decoded.progress, rewrite)
            }
            Ok(None) => {
                info!("no stored user record; creating default");
                (UserProgress::default(), true)
            }
            Err(err) => {
                warn!(error = %err, "progress storage unavailable; using in-memory defaults");
                (UserProgress::default(), false)
            }
        };

        let store = Self::with_state(user, repo);
        if rewrite {
            let guard = store.state.lock().await;
            store.persist(&guard).await;
        }
        store
    }

    fn with_state(user: UserProgress, repo: Arc<dyn ProgressRepository>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Mutex::new(user),
            repo,
            events,
        }
    }

    async fn persist(&self, user: &UserProgress) {
        if let Err(err) = self.repo.save_user(user).await {
            warn!(error = %err, "failed to persist user record");
        }
    }

    fn emit(&self, event: ProgressEvent) {
        // no receivers is fine
        let _ = self.events.send(event);
    }

    /// Clone of the current record.
    pub async fn snapshot(&self) -> UserProgress {
        self.state.lock().await.clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.events.subscribe()
    }

    /// Returns true when the section was newly completed.
    pub async fn mark_section_complete(&self, id: SectionId) -> bool {
        let mut guard = self.state.lock().await;
        if !guard.mark_section_complete(id.clone()) {
            return false;
        }
        self.persist(&guard).await;
        drop(guard);
        debug!(section = %id, "section completed");
        self.emit(ProgressEvent::SectionCompleted(id));
        true
    }

    /// Returns true when the interactive was newly completed.
    pub async fn mark_interactive_complete(&self, id: InteractiveId) -> bool {
        let mut guard = self.state.lock().await;
        if !guard.mark_interactive_complete(id.clone()) {
            return false;
        }
        self.persist(&guard).await;
        drop(guard);
        debug!(interactive = %id, "interactive completed");
        self.emit(ProgressEvent::InteractiveCompleted(id));
        true
    }

    /// Add points unconditionally and return the new total.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::ZeroPoints` for a zero amount; nothing is written.
    pub async fn add_points(&self, amount: u32) -> Result<u32, ProgressError> {
        let mut guard = self.state.lock().await;
        let total = guard.add_points(amount)?;
        self.persist(&guard).await;
        drop(guard);
        self.emit(ProgressEvent::PointsAdded { amount, total });
        Ok(total)
    }

    /// Persists only when the value changes.
    pub async fn update_last_viewed_section(&self, id: SectionId) -> bool {
        let mut guard = self.state.lock().await;
        if !guard.set_last_viewed_section(id.clone()) {
            return false;
        }
        self.persist(&guard).await;
        drop(guard);
        self.emit(ProgressEvent::LastViewedChanged(id));
        true
    }

    /// Clear points, completions and last viewed; identity is kept.
    pub async fn reset_progress(&self) {
        let mut guard = self.state.lock().await;
        guard.reset();
        self.persist(&guard).await;
        drop(guard);
        info!("progress reset");
        self.emit(ProgressEvent::Reset);
    }

    /// Complete a section and award `points` only if it was not complete yet.
    /// Returns the points awarded.
    pub async fn complete_section(&self, id: SectionId, points: u32) -> u32 {
        let mut guard = self.state.lock().await;
        if !guard.mark_section_complete(id.clone()) {
            return 0;
        }
        let award = guard.add_points(points).map(|total| (points, total)).ok();
        self.persist(&guard).await;
        drop(guard);

        debug!(section = %id, points, "section completed");
        self.emit(ProgressEvent::SectionCompleted(id));
        match award {
            Some((amount, total)) => {
                self.emit(ProgressEvent::PointsAdded { amount, total });
                amount
            }
            None => 0,
        }
    }

    /// Complete an interactive and award `points` only on first completion.
    /// Returns the points awarded.
    pub async fn complete_interactive(&self, id: InteractiveId, points: u32) -> u32 {
        let mut guard = self.state.lock().await;
        if !guard.mark_interactive_complete(id.clone()) {
            return 0;
        }
        let award = guard.add_points(points).map(|total| (points, total)).ok();
        self.persist(&guard).await;
        drop(guard);

        debug!(interactive = %id, points, "interactive completed");
        self.emit(ProgressEvent::InteractiveCompleted(id));
        match award {
            Some((amount, total)) => {
                self.emit(ProgressEvent::PointsAdded { amount, total });
                amount
            }
            None => 0,
        }
    }
}
