//! Section visibility and completion state machine.
//!
//! The host reports batches of `(section id, is_intersecting)` pairs. The very
//! first batch after mount describes the initial layout of every observed
//! section rather than a transition, so it is handled separately from the
//! steady-state batches produced by scrolling.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::model::{FlatSection, SectionId};

//
// ─── TRIGGER BAND ──────────────────────────────────────────────────────────────
//

/// Horizontal band of the viewport, as fractions of its height from the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerBand {
    top: f64,
    bottom: f64,
}

impl Default for TriggerBand {
    fn default() -> Self {
        Self {
            top: 0.20,
            bottom: 0.80,
        }
    }
}

impl TriggerBand {
    /// Whether an element spanning `[element_top, element_bottom)` (viewport
    /// pixels) overlaps the band.
    #[must_use]
    pub fn intersects(&self, element_top: f64, element_bottom: f64, viewport_height: f64) -> bool {
        let band_top = viewport_height * self.top;
        let band_bottom = viewport_height * self.bottom;
        element_top < band_bottom && element_bottom > band_top
    }

    /// CSS `rootMargin` that shrinks an observer's root to this band.
    #[must_use]
    pub fn root_margin(&self) -> String {
        let top = (self.top * 100.0).round();
        let bottom = ((1.0 - self.bottom) * 100.0).round();
        format!("-{top}% 0px -{bottom}% 0px")
    }
}

//
// ─── OBSERVATIONS ──────────────────────────────────────────────────────────────
//

/// One entry of an observation batch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationEntry {
    pub id: SectionId,
    pub is_intersecting: bool,
}

impl ObservationEntry {
    pub fn new(id: impl Into<SectionId>, is_intersecting: bool) -> Self {
        Self {
            id: id.into(),
            is_intersecting,
        }
    }
}

/// Position of a rendered section relative to the viewport top, in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionLayout {
    pub id: SectionId,
    pub top: f64,
    pub bottom: f64,
}

/// Simulates an intersection observer from scroll geometry.
///
/// The first poll reports every section (the initial-state batch); later polls
/// report only sections whose intersection changed.
#[derive(Debug, Clone, Default)]
pub struct LayoutObserver {
    band: TriggerBand,
    last: Option<HashMap<SectionId, bool>>,
}

impl LayoutObserver {
    #[must_use]
    pub fn new(band: TriggerBand) -> Self {
        Self { band, last: None }
    }

    pub fn poll(&mut self, layouts: &[SectionLayout], viewport_height: f64) -> Vec<ObservationEntry> {
        let current: Vec<ObservationEntry> = layouts
            .iter()
            .map(|layout| ObservationEntry {
                id: layout.id.clone(),
                is_intersecting: self.band.intersects(layout.top, layout.bottom, viewport_height),
            })
            .collect();

        let batch = match &self.last {
            None => current.clone(),
            Some(previous) => current
                .iter()
                .filter(|entry| previous.get(&entry.id) != Some(&entry.is_intersecting))
                .cloned()
                .collect(),
        };

        self.last = Some(
            current
                .into_iter()
                .map(|entry| (entry.id, entry.is_intersecting))
                .collect(),
        );
        batch
    }
}

/// Reading progress through a scroll container, `0.0..=100.0`.
#[must_use]
pub fn scroll_percentage(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

//
// ─── TRACKER ───────────────────────────────────────────────────────────────────
//

/// Side effect requested by the tracker, in application order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerEffect {
    /// The section became the active one for navigation highlighting.
    Activate(SectionId),
    /// Persist as last viewed (the store skips unchanged values).
    UpdateLastViewed(SectionId),
    /// First time in the band this session; drives the fade-in.
    Reveal(SectionId),
    /// Not yet complete: mark complete and award section points.
    CompleteSection(SectionId),
}

/// Ephemeral per-session visibility state.
#[derive(Debug, Clone, PartialEq, Eq)]
struct VisibilityState {
    active_section: SectionId,
    visible_sections: HashSet<SectionId>,
}

impl Default for VisibilityState {
    fn default() -> Self {
        let root = SectionId::root();
        Self {
            visible_sections: HashSet::from([root.clone()]),
            active_section: root,
        }
    }
}

/// Drives `NotObserved -> Visible -> Visible+Completed` per section.
#[derive(Debug, Clone)]
pub struct VisibilityTracker {
    document_order: HashMap<SectionId, usize>,
    state: VisibilityState,
    bootstrapped: bool,
    completion_requested: HashSet<SectionId>,
}

impl VisibilityTracker {
    /// A tracker over the flattened section list; its order is the tie-break
    /// for sections reported in the same batch.
    #[must_use]
    pub fn new(sections: &[FlatSection]) -> Self {
        Self {
            document_order: sections
                .iter()
                .enumerate()
                .map(|(idx, section)| (section.id.clone(), idx))
                .collect(),
            state: VisibilityState::default(),
            bootstrapped: false,
            completion_requested: HashSet::new(),
        }
    }

    #[must_use]
    pub fn active_section(&self) -> &SectionId {
        &self.state.active_section
    }

    /// The host observer was torn down and re-attached; its next batch is
    /// again an initial-state report.
    pub fn resubscribe(&mut self) {
        self.bootstrapped = false;
    }

    /// Forget which sections were handed to the completion path, so that a
    /// progress reset makes them eligible again. Visibility is kept.
    pub fn on_progress_reset(&mut self) {
        self.completion_requested.clear();
    }

    /// Feed one observation batch. `is_complete` reports persisted completion.
    pub fn observe<F>(&mut self, batch: &[ObservationEntry], is_complete: F) -> Vec<TrackerEffect>
    where
        F: Fn(&SectionId) -> bool,
    {
        let mut entries: Vec<(usize, &ObservationEntry)> = batch
            .iter()
            .filter_map(|entry| self.document_order.get(&entry.id).map(|idx| (*idx, entry)))
            .collect();
        entries.sort_by_key(|(idx, _)| *idx);

        let mut effects = Vec::new();

        if !self.bootstrapped {
            self.bootstrapped = true;
            let active = self.state.active_section.clone();
            let active_intersecting = entries
                .iter()
                .any(|(_, entry)| entry.id == active && entry.is_intersecting);

            if active_intersecting {
                self.reveal_and_complete(&active, &is_complete, &mut effects);
            } else if let Some((_, entry)) =
                entries.iter().find(|(_, entry)| entry.is_intersecting)
            {
                let id = entry.id.clone();
                self.state.active_section = id.clone();
                effects.push(TrackerEffect::Activate(id.clone()));
                self.reveal_and_complete(&id, &is_complete, &mut effects);
            }
            return effects;
        }

        for (_, entry) in entries.into_iter().filter(|(_, entry)| entry.is_intersecting) {
            let id = entry.id.clone();
            self.state.active_section = id.clone();
            effects.push(TrackerEffect::Activate(id.clone()));
            effects.push(TrackerEffect::UpdateLastViewed(id.clone()));
            self.reveal_and_complete(&id, &is_complete, &mut effects);
        }
        effects
    }

    fn reveal_and_complete<F>(
        &mut self,
        id: &SectionId,
        is_complete: &F,
        effects: &mut Vec<TrackerEffect>,
    ) where
        F: Fn(&SectionId) -> bool,
    {
        if self.state.visible_sections.insert(id.clone()) {
            effects.push(TrackerEffect::Reveal(id.clone()));
        }
        if !is_complete(id) && self.completion_requested.insert(id.clone()) {
            effects.push(TrackerEffect::CompleteSection(id.clone()));
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
