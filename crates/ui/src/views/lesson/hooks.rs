use std::sync::Arc;
use std::time::Duration;

use dioxus::document::eval;
use dioxus::prelude::*;
use serde::Deserialize;
use services::{Certificate, Clock, ProgressEvent, ProgressStore};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};
use vanguard_core::model::{Curriculum, SectionId};
use vanguard_core::palette::is_palette_shortcut;
use vanguard_core::visibility::{ObservationEntry, TrackerEffect, TriggerBand, scroll_percentage};

use super::scripts::{
    scroll_listener_script, scroll_to_section_script, section_observer_script,
    shortcut_listener_script, teardown_listeners_script,
};
use super::state::{LessonState, LessonTracker};
use crate::views::palette::toggle_palette;
use crate::vm::PointsToast;

const RESTORE_SETTLE: Duration = Duration::from_millis(150);
const TOAST_LIFETIME: Duration = Duration::from_millis(2000);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShortcutPress {
    key: String,
    command: bool,
    in_text_field: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScrollMetrics {
    scroll_top: f64,
    scroll_height: f64,
    client_height: f64,
}

/// Mirror store events into the page: user record, "+N" toasts and the
/// one-shot completion certificate.
pub(crate) fn use_progress_events(
    store: Arc<ProgressStore>,
    curriculum: Arc<Curriculum>,
    clock: Clock,
    state: LessonState,
) {
    use_future(move || {
        let store = Arc::clone(&store);
        let curriculum = Arc::clone(&curriculum);
        let mut state = state;
        async move {
            let mut events = store.subscribe();
            let total = curriculum.total_sections();
            loop {
                match events.recv().await {
                    Ok(ProgressEvent::PointsAdded { amount, .. }) => push_toast(state, amount),
                    Ok(ProgressEvent::Reset) => {
                        state.celebration.write().rearm();
                        state.certificate.set(None);
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "progress events lagged; resyncing");
                    }
                    Err(RecvError::Closed) => break,
                }

                let user = store.snapshot().await;
                if state.celebration.write().check(&user, total) {
                    state
                        .certificate
                        .set(Some(Certificate::issue(&user, &curriculum, clock)));
                }
                state.user.set(user);
            }
        }
    });
}

fn push_toast(mut state: LessonState, amount: u32) {
    let id = {
        let mut next = state.next_toast_id.write();
        *next += 1;
        *next
    };
    state.toasts.write().push(PointsToast { id, amount });
    spawn(async move {
        tokio::time::sleep(TOAST_LIFETIME).await;
        state.toasts.write().retain(|toast| toast.id != id);
    });
}

/// Attach the section observer and feed its batches through the tracker.
pub(crate) fn use_section_observer(tracker: LessonTracker, band: TriggerBand, state: LessonState) {
    use_effect(move || {
        let tracker = tracker.get();
        let margin = band.root_margin();
        let mut state = state;
        spawn(async move {
            tracker.resubscribe().await;
            state.active.set(tracker.active_section().await);
            let mut bridge = eval(&section_observer_script(&margin));
            loop {
                match bridge.recv::<Vec<ObservationEntry>>().await {
                    Ok(batch) => {
                        let effects = tracker.observe(&batch).await;
                        apply_effects(&mut state, effects);
                    }
                    Err(err) => {
                        warn!(error = ?err, "section observer bridge closed");
                        break;
                    }
                }
            }
        });
    });
}

fn apply_effects(state: &mut LessonState, effects: Vec<TrackerEffect>) {
    for effect in effects {
        match effect {
            TrackerEffect::Activate(id) => state.active.set(id),
            TrackerEffect::Reveal(id) => {
                state.revealed.write().insert(id);
            }
            // already applied to the store by the tracker
            TrackerEffect::UpdateLastViewed(_) | TrackerEffect::CompleteSection(_) => {}
        }
    }
}

pub(crate) fn use_palette_shortcut(state: LessonState) {
    use_effect(move || {
        let palette = state.palette;
        spawn(async move {
            let mut bridge = eval(&shortcut_listener_script());
            while let Ok(press) = bridge.recv::<ShortcutPress>().await {
                if is_palette_shortcut(&press.key, press.command, press.in_text_field) {
                    toggle_palette(palette);
                }
            }
        });
    });
}

pub(crate) fn use_scroll_progress(state: LessonState) {
    use_effect(move || {
        let mut percent = state.scroll_percent;
        spawn(async move {
            let mut bridge = eval(&scroll_listener_script());
            while let Ok(metrics) = bridge.recv::<ScrollMetrics>().await {
                percent.set(scroll_percentage(
                    metrics.scroll_top,
                    metrics.scroll_height,
                    metrics.client_height,
                ));
            }
        });
    });
}

/// Scroll back to the last viewed section once, after layout settles.
pub(crate) fn use_scroll_restore(last_viewed: SectionId) {
    use_hook(move || {
        if last_viewed.is_root() {
            return;
        }
        spawn(async move {
            tokio::time::sleep(RESTORE_SETTLE).await;
            debug!(section = %last_viewed, "restoring scroll position");
            let _ = eval(&scroll_to_section_script(last_viewed.as_str(), false)).await;
        });
    });
}

pub(crate) fn use_listener_teardown() {
    use_drop(|| {
        let _ = eval(teardown_listeners_script());
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_payloads_use_camel_case() {
        let batch: Vec<ObservationEntry> =
            serde_json::from_str(r#"[{"id":"1-1","isIntersecting":true}]"#).unwrap();
        assert_eq!(batch, vec![ObservationEntry::new("1-1", true)]);

        let press: ShortcutPress =
            serde_json::from_str(r#"{"key":"/","command":false,"inTextField":true}"#).unwrap();
        assert!(!is_palette_shortcut(&press.key, press.command, press.in_text_field));

        let metrics: ScrollMetrics =
            serde_json::from_str(r#"{"scrollTop":250,"scrollHeight":1500,"clientHeight":500}"#)
                .unwrap();
        assert!(
            (scroll_percentage(metrics.scroll_top, metrics.scroll_height, metrics.client_height)
                - 25.0)
                .abs()
                < f64::EPSILON
        );
    }
}
