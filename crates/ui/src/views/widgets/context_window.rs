use std::sync::Arc;

use dioxus::prelude::*;
use services::{Debouncer, SLIDER_SETTLE};
use tracing::warn;
use vanguard_core::model::{InteractiveId, visible_context};

use super::{LabResult, WidgetHeading};
use crate::context::AppContext;
use crate::views::lesson::{LessonState, award_interactive};
use crate::vm::{CONTEXT_SAMPLE, LabOutput, context_summary_request};

const START_PERCENT: u8 = 25;

fn split_sample(percent: u8) -> (String, String) {
    let inside = visible_context(CONTEXT_SAMPLE, percent);
    let kept = inside.split_whitespace().count();
    let outside = CONTEXT_SAMPLE
        .split_whitespace()
        .skip(kept)
        .collect::<Vec<_>>()
        .join(" ");
    (inside, outside)
}

/// Slider-sized context window with a debounced summary of what fits.
#[component]
pub fn ContextWindowLab(interactive_id: InteractiveId) -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<LessonState>();
    let mut percent = use_signal(|| START_PERCENT);
    let mut output = use_signal(|| LabOutput::Empty);
    let mut latest = use_signal(|| 0_u64);
    let debouncer = use_hook(|| Debouncer::new(SLIDER_SETTLE));
    use_drop({
        let debouncer = debouncer.clone();
        move || debouncer.cancel()
    });

    let completed = state.user.read().is_interactive_complete(&interactive_id);
    let factory = ctx.ai();
    let store = ctx.progress();
    let (inside, outside) = split_sample(percent());
    let usage = percent();

    let on_input = move |evt: FormEvent| {
        let Ok(value) = evt.value().parse::<u8>() else {
            return;
        };
        percent.set(value);
        let Some(request) = context_summary_request(&visible_context(CONTEXT_SAMPLE, value)) else {
            return;
        };
        let debouncer = debouncer.clone();
        let factory = Arc::clone(&factory);
        let store = Arc::clone(&store);
        let id = interactive_id.clone();
        spawn(async move {
            debouncer
                .run(move || async move {
                    let ticket = {
                        let mut latest = latest.write();
                        *latest += 1;
                        *latest
                    };
                    output.set(LabOutput::Loading);
                    let reply = match factory.client() {
                        Ok(client) => client.generate(&request).await,
                        Err(err) => Err(err),
                    };
                    if *latest.peek() != ticket {
                        return;
                    }
                    match reply {
                        Ok(text) => {
                            output.set(LabOutput::answer(&text));
                            award_interactive(store, id).await;
                        }
                        Err(err) => {
                            warn!(error = %err, "context window summary failed");
                            output.set(LabOutput::Failed);
                        }
                    }
                })
                .await;
        });
    };

    rsx! {
        div { class: "widget widget--context",
            WidgetHeading { title: "The Sliding Window", completed }
            p { class: "widget-blurb",
                "AI memory is like a backpack with limited space. It can only carry the highlighted text."
            }
            div { class: "meter",
                div { class: "meter-fill", style: "width: {usage}%" }
                span { class: "meter-label", "Memory Usage: {usage}%" }
            }
            div { class: "context-columns",
                div { class: "context-document",
                    mark { "{inside}" }
                    " "
                    span { class: "context-outside", "{outside}" }
                }
                div { class: "context-summary",
                    LabResult { output: output() }
                }
            }
            input {
                r#type: "range",
                min: "10",
                max: "100",
                value: "{usage}",
                oninput: on_input,
            }
        }
    }
}
