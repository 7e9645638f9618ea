use dioxus::prelude::*;
use vanguard_core::model::{SectionId, UserProgress};
use vanguard_core::visibility::TriggerBand;

use super::content::SectionBlock;
use super::hooks::{
    use_listener_teardown, use_palette_shortcut, use_progress_events, use_scroll_progress,
    use_scroll_restore, use_section_observer,
};
use super::state::{LessonState, LessonTracker, use_lesson_state};
use crate::context::AppContext;
use crate::views::celebration::CelebrationPanel;
use crate::views::header::Header;
use crate::views::palette::CommandPalette;
use crate::views::sidebar::Sidebar;
use crate::views::tutor::TutorPanel;

#[component]
pub fn LessonView(initial: UserProgress) -> Element {
    let ctx = use_context::<AppContext>();
    let last_viewed = initial.last_viewed_section().clone();
    let state = use_lesson_state(initial);
    use_context_provider(|| state);
    let tracker = use_context_provider({
        let ctx = ctx.clone();
        move || LessonTracker::new(ctx.section_tracker())
    });

    use_progress_events(ctx.progress(), ctx.curriculum(), ctx.clock(), state);
    use_section_observer(tracker, TriggerBand::default(), state);
    use_palette_shortcut(state);
    use_scroll_progress(state);
    use_scroll_restore(last_viewed);
    use_listener_teardown();

    let sections: Vec<(String, SectionId, usize)> = ctx
        .sections()
        .iter()
        .map(|flat| (flat.id.to_string(), flat.id.clone(), flat.depth))
        .collect();
    let tagline = ctx.curriculum().tagline().map(str::to_owned);

    rsx! {
        ScrollProgressBar {}
        Header {}
        div { class: "layout",
            Sidebar {}
            main { class: "lesson", id: "lesson-root",
                for (key, id, depth) in sections {
                    SectionBlock { key: "{key}", id, depth }
                }
                footer { class: "lesson-footer",
                    if let Some(tagline) = tagline {
                        p { "{tagline}" }
                    }
                }
            }
        }
        CommandPalette {}
        TutorPanel {}
        CelebrationPanel {}
    }
}

#[component]
fn ScrollProgressBar() -> Element {
    let state = use_context::<LessonState>();
    let percent = (state.scroll_percent)();

    rsx! {
        div { class: "scroll-progress",
            div { class: "scroll-progress-fill", style: "width: {percent:.1}%" }
        }
    }
}
