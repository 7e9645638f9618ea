use std::sync::Arc;

use dioxus::prelude::*;
use vanguard_core::model::{InteractiveId, predict_score};

use super::WidgetHeading;
use crate::context::AppContext;
use crate::views::lesson::{LessonState, award_interactive};

const START_HOURS: f64 = 5.0;

#[component]
pub fn PredictionSlider(interactive_id: InteractiveId) -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<LessonState>();
    let mut hours = use_signal(|| START_HOURS);
    let mut touched = use_signal(|| false);

    let completed = state.user.read().is_interactive_complete(&interactive_id);
    let store = ctx.progress();
    let score = predict_score(hours());
    let hours_label = format!("{:.1}", hours());

    let on_input = move |evt: FormEvent| {
        let Ok(value) = evt.value().parse::<f64>() else {
            return;
        };
        hours.set(value);
        if !touched() {
            touched.set(true);
            spawn(award_interactive(Arc::clone(&store), interactive_id.clone()));
        }
    };

    rsx! {
        div { class: "widget widget--prediction",
            WidgetHeading { title: "Prediction Engine: Student Success", completed }
            p { class: "widget-blurb",
                "The model learned a straight line from past students. Slide to see what it predicts for a new one."
            }
            label { r#for: "study-hours", class: "slider-label",
                "If a new student studies {hours_label} hours..."
            }
            input {
                id: "study-hours",
                r#type: "range",
                min: "0",
                max: "10",
                step: "0.5",
                value: "{hours_label}",
                oninput: on_input,
            }
            div { class: "prediction",
                p { "The AI predicts a score of:" }
                p { class: "prediction-score", "{score}%" }
                div { class: "meter",
                    div { class: "meter-fill", style: "width: {score}%" }
                }
            }
        }
    }
}
