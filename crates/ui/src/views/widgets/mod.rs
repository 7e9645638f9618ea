//! Interactive lesson widgets, dispatched on `WidgetKind`.

mod ai_lab;
mod context_window;
mod prediction;

use dioxus::prelude::*;
use vanguard_core::model::{INTERACTIVE_POINTS, InteractiveId, WidgetKind};

use crate::vm::{LAB_ERROR_MESSAGE, LabOutput};

pub use ai_lab::AiPromptLab;
pub use context_window::ContextWindowLab;
pub use prediction::PredictionSlider;

#[component]
pub fn Widget(kind: WidgetKind, interactive_id: InteractiveId) -> Element {
    match kind {
        WidgetKind::PredictionSlider => rsx! { PredictionSlider { interactive_id } },
        WidgetKind::ContextWindowLab => rsx! { ContextWindowLab { interactive_id } },
        WidgetKind::AiLab(spec) => rsx! { AiPromptLab { spec, interactive_id } },
        WidgetKind::Unknown(name) => rsx! { WidgetPlaceholder { name } },
    }
}

#[component]
pub fn WidgetPlaceholder(name: String) -> Element {
    rsx! {
        div { class: "widget widget--placeholder",
            h4 { "{name}" }
            p { "This interactive lab is not available in the desktop edition yet." }
        }
    }
}

#[component]
pub fn WidgetHeading(title: String, completed: bool) -> Element {
    rsx! {
        div { class: "widget-header",
            h4 { "{title}" }
            if completed {
                span { class: "widget-done", "+{INTERACTIVE_POINTS} earned" }
            }
        }
    }
}

#[component]
pub fn LabResult(output: LabOutput) -> Element {
    match output {
        LabOutput::Empty => rsx! {},
        LabOutput::Loading => rsx! {
            p { class: "lab-loading", "Thinking..." }
        },
        LabOutput::Answer { html } => rsx! {
            div { class: "lab-output", dangerous_inner_html: "{html}" }
        },
        LabOutput::Failed => rsx! {
            p { class: "lab-error", "{LAB_ERROR_MESSAGE}" }
        },
    }
}
