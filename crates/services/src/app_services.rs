use std::sync::Arc;

use storage::repository::Storage;
use tracing::{info, warn};
use vanguard_core::model::{Curriculum, FlatSection};
use vanguard_core::vanguard_curriculum;

use crate::Clock;
use crate::ai::{AiClientFactory, AiConfig, TutorService};
use crate::error::AppServicesError;
use crate::progress_store::ProgressStore;
use crate::section_tracker::SectionTracker;

/// Assembles the app-facing services around one curriculum and one store.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    curriculum: Arc<Curriculum>,
    sections: Arc<Vec<FlatSection>>,
    progress: Arc<ProgressStore>,
    ai: Arc<AiClientFactory>,
    tutor: TutorService,
}

impl AppServices {
    /// Build services backed by `SQLite` storage. A database that cannot be
    /// opened or migrated is logged and replaced by in-memory storage for the
    /// session.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the built-in curriculum is invalid.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        ai_config: AiConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = match Storage::sqlite(db_url).await {
            Ok(storage) => storage,
            Err(err) => {
                warn!(
                    error = %err,
                    db = db_url,
                    "progress database unavailable; keeping progress in memory"
                );
                Storage::in_memory()
            }
        };
        Self::from_storage(storage, clock, ai_config).await
    }

    /// Build services backed by in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the built-in curriculum is invalid.
    pub async fn in_memory(clock: Clock, ai_config: AiConfig) -> Result<Self, AppServicesError> {
        Self::from_storage(Storage::in_memory(), clock, ai_config).await
    }

    /// Build services over an existing storage aggregate.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the built-in curriculum is invalid.
    pub async fn from_storage(
        storage: Storage,
        clock: Clock,
        ai_config: AiConfig,
    ) -> Result<Self, AppServicesError> {
        let curriculum = Arc::new(vanguard_curriculum()?);
        let sections = Arc::new(curriculum.flatten());
        let progress = Arc::new(ProgressStore::load(Arc::clone(&storage.progress)).await);
        let ai = Arc::new(AiClientFactory::new(ai_config));
        let tutor = TutorService::new(Arc::clone(&ai), Arc::clone(&curriculum));

        info!(
            sections = sections.len(),
            ai_configured = ai.is_configured(),
            "app services ready"
        );

        Ok(Self {
            clock,
            curriculum,
            sections,
            progress,
            ai,
            tutor,
        })
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn curriculum(&self) -> Arc<Curriculum> {
        Arc::clone(&self.curriculum)
    }

    /// Flattened section list shared by observer, palette and tutor.
    #[must_use]
    pub fn sections(&self) -> Arc<Vec<FlatSection>> {
        Arc::clone(&self.sections)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressStore> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn ai(&self) -> Arc<AiClientFactory> {
        Arc::clone(&self.ai)
    }

    #[must_use]
    pub fn tutor(&self) -> TutorService {
        self.tutor.clone()
    }

    /// A fresh tracker for one mount of the lesson view.
    #[must_use]
    pub fn section_tracker(&self) -> SectionTracker {
        SectionTracker::new(&self.sections, Arc::clone(&self.progress))
    }
}
