use std::sync::Arc;

use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::lesson::LessonView;
use crate::views::{ViewError, ViewState, view_state_from_resource};

/// Loads the learner record once, then mounts the lesson page.
#[component]
pub fn Shell() -> Element {
    let ctx = use_context::<AppContext>();
    let store = ctx.progress();
    let resource = use_resource(move || {
        let store = Arc::clone(&store);
        async move { Ok::<_, ViewError>(store.snapshot().await) }
    });

    match view_state_from_resource(resource) {
        ViewState::Idle | ViewState::Loading => rsx! {
            div { class: "loading", "Loading your progress..." }
        },
        ViewState::Ready(user) => rsx! {
            LessonView { initial: user }
        },
        ViewState::Error(err) => {
            let message = err.message();
            rsx! {
                div { class: "fatal",
                    p { "{message}" }
                }
            }
        }
    }
}
