use std::collections::HashSet;
use std::sync::Arc;

use dioxus::prelude::*;
use services::{CelebrationGate, Certificate, SectionTracker};
use vanguard_core::model::{SectionId, UserProgress};
use vanguard_core::palette::PaletteState;

use crate::vm::PointsToast;

/// Signals shared by every part of the lesson page.
#[derive(Clone, Copy)]
pub struct LessonState {
    pub user: Signal<UserProgress>,
    pub active: Signal<SectionId>,
    pub revealed: Signal<HashSet<SectionId>>,
    pub palette: Signal<PaletteState>,
    pub tutor_open: Signal<bool>,
    pub celebration: Signal<CelebrationGate>,
    pub certificate: Signal<Option<Certificate>>,
    pub toasts: Signal<Vec<PointsToast>>,
    pub next_toast_id: Signal<u64>,
    pub scroll_percent: Signal<f64>,
}

pub fn use_lesson_state(initial: UserProgress) -> LessonState {
    let active = use_signal(SectionId::root);
    let user = use_signal(|| initial);
    let revealed = use_signal(|| HashSet::from([SectionId::root()]));
    let palette = use_signal(PaletteState::default);
    let tutor_open = use_signal(|| false);
    let celebration = use_signal(CelebrationGate::default);
    let certificate = use_signal(|| None::<Certificate>);
    let toasts = use_signal(Vec::new);
    let next_toast_id = use_signal(|| 0_u64);
    let scroll_percent = use_signal(|| 0.0_f64);

    LessonState {
        user,
        active,
        revealed,
        palette,
        tutor_open,
        celebration,
        certificate,
        toasts,
        next_toast_id,
        scroll_percent,
    }
}

/// Tracker for the mounted lesson page, shared through context.
#[derive(Clone)]
pub struct LessonTracker(Arc<SectionTracker>);

impl LessonTracker {
    #[must_use]
    pub fn new(tracker: SectionTracker) -> Self {
        Self(Arc::new(tracker))
    }

    #[must_use]
    pub fn get(&self) -> Arc<SectionTracker> {
        Arc::clone(&self.0)
    }
}
