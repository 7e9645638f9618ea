use std::sync::Arc;

use dioxus::document::eval;
use dioxus::prelude::*;
use services::{ProgressStore, SectionTracker};
use tracing::{debug, info};
use vanguard_core::model::{INTERACTIVE_POINTS, InteractiveId, SectionId};

use super::scripts::{scroll_to_section_script, scroll_to_top_script};

/// Scroll to a section and record `#id` in history.
pub(crate) fn navigate_to_section(id: &SectionId) {
    let script = scroll_to_section_script(id.as_str(), true);
    spawn(async move {
        let _ = eval(&script).await;
    });
}

pub(crate) fn reset_progress(store: Arc<ProgressStore>, tracker: Arc<SectionTracker>) {
    spawn(async move {
        store.reset_progress().await;
        tracker.on_progress_reset().await;
        info!("learner reset progress");
        let _ = eval(scroll_to_top_script()).await;
    });
}

/// Award an interactive on its first completion.
pub(crate) async fn award_interactive(store: Arc<ProgressStore>, id: InteractiveId) {
    let awarded = store.complete_interactive(id.clone(), INTERACTIVE_POINTS).await;
    if awarded > 0 {
        debug!(interactive = %id, awarded, "interactive completed");
    }
}
