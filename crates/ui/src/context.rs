use std::sync::Arc;

use services::ai::{AiClientFactory, TutorService};
use services::{AppServices, Clock, ProgressStore, SectionTracker};
use vanguard_core::model::{Curriculum, FlatSection};

pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;
    fn curriculum(&self) -> Arc<Curriculum>;
    fn sections(&self) -> Arc<Vec<FlatSection>>;
    fn progress(&self) -> Arc<ProgressStore>;
    fn ai(&self) -> Arc<AiClientFactory>;
    fn tutor(&self) -> TutorService;
    fn section_tracker(&self) -> SectionTracker;
}

impl UiApp for AppServices {
    fn clock(&self) -> Clock {
        AppServices::clock(self)
    }

    fn curriculum(&self) -> Arc<Curriculum> {
        AppServices::curriculum(self)
    }

    fn sections(&self) -> Arc<Vec<FlatSection>> {
        AppServices::sections(self)
    }

    fn progress(&self) -> Arc<ProgressStore> {
        AppServices::progress(self)
    }

    fn ai(&self) -> Arc<AiClientFactory> {
        AppServices::ai(self)
    }

    fn tutor(&self) -> TutorService {
        AppServices::tutor(self)
    }

    fn section_tracker(&self) -> SectionTracker {
        AppServices::section_tracker(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    app: Arc<dyn UiApp>,
    clock: Clock,
    curriculum: Arc<Curriculum>,
    sections: Arc<Vec<FlatSection>>,
    progress: Arc<ProgressStore>,
    ai: Arc<AiClientFactory>,
    tutor: TutorService,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            app: Arc::clone(app),
            clock: app.clock(),
            curriculum: app.curriculum(),
            sections: app.sections(),
            progress: app.progress(),
            ai: app.ai(),
            tutor: app.tutor(),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn curriculum(&self) -> Arc<Curriculum> {
        Arc::clone(&self.curriculum)
    }

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

    /// A tracker for one mount of the lesson view. Each mount starts with a
    /// fresh bootstrap pass.
    #[must_use]
    pub fn section_tracker(&self) -> SectionTracker {
        self.app.section_tracker()
    }
}

// Provided by the composition root (`crates/app`) through `LaunchBuilder::with_context`.

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
