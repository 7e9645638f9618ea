use std::sync::Arc;

use dioxus::prelude::*;
use tracing::warn;
use vanguard_core::model::{AiLabSpec, InteractiveId};

use super::{LabResult, WidgetHeading};
use crate::context::AppContext;
use crate::views::lesson::{LessonState, award_interactive};
use crate::vm::{LabOutput, lab_request};

/// Free-text prompt lab: instruction plus learner input, rendered as markdown.
#[component]
pub fn AiPromptLab(spec: AiLabSpec, interactive_id: InteractiveId) -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<LessonState>();
    let mut input = use_signal(String::new);
    let mut output = use_signal(|| LabOutput::Empty);

    let completed = state.user.read().is_interactive_complete(&interactive_id);
    let busy = output.read().is_loading();
    let factory = ctx.ai();
    let store = ctx.progress();

    let on_run = move |_| {
        if output.peek().is_loading() {
            return;
        }
        let Some(request) = lab_request(&spec, &input.peek()) else {
            return;
        };
        output.set(LabOutput::Loading);
        let factory = Arc::clone(&factory);
        let store = Arc::clone(&store);
        let id = interactive_id.clone();
        spawn(async move {
            let reply = match factory.client() {
                Ok(client) => client.generate(&request).await,
                Err(err) => Err(err),
            };
            match reply {
                Ok(text) => {
                    output.set(LabOutput::answer(&text));
                    award_interactive(store, id).await;
                }
                Err(err) => {
                    warn!(error = %err, lab = spec.component, "lab request failed");
                    output.set(LabOutput::Failed);
                }
            }
        });
    };

    let title = spec.title.to_owned();
    let blurb = spec.blurb;
    let placeholder = spec.placeholder;

    rsx! {
        div { class: "widget widget--lab",
            WidgetHeading { title, completed }
            p { class: "widget-blurb", "{blurb}" }
            textarea {
                class: "lab-input",
                rows: "4",
                placeholder: "{placeholder}",
                value: "{input}",
                oninput: move |evt| input.set(evt.value()),
            }
            button { class: "btn btn-primary", disabled: busy, onclick: on_run,
                if busy {
                    "Thinking..."
                } else {
                    "Run"
                }
            }
            LabResult { output: output() }
        }
    }
}
