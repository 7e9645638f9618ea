use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::lesson::{LessonState, LessonTracker, reset_progress};
use crate::views::palette::toggle_palette;
use crate::vm::{HeaderVm, PointsToast, ResetConfirm, map_header};

#[component]
pub fn Header() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<LessonState>();
    let tracker = use_context::<LessonTracker>();
    let mut confirm = use_signal(ResetConfirm::default);
    let mut tutor_open = state.tutor_open;

    let vm = map_header(&state.user.read(), ctx.curriculum().total_sections());
    let toasts = state.toasts.read().clone();
    let reset_label = confirm.read().label();
    let reset_class = if confirm() == ResetConfirm::Armed {
        "btn btn-danger"
    } else {
        "btn btn-ghost"
    };
    let store = ctx.progress();

    let on_reset = move |_| {
        if confirm.write().click() {
            reset_progress(store.clone(), tracker.get());
        }
    };

    rsx! {
        header { class: "app-header",
            div { class: "brand",
                span { class: "brand-mark", "ZEN AI" }
                span { class: "brand-name", "VANGUARD" }
            }
            div { class: "header-actions",
                button {
                    class: "btn btn-ghost",
                    title: "Jump to section (Ctrl+K)",
                    onclick: move |_| toggle_palette(state.palette),
                    "Search"
                }
                button {
                    class: "btn btn-ghost",
                    onclick: move |_| tutor_open.toggle(),
                    "Tutor"
                }
                HeaderStats { vm, toasts }
                button {
                    class: "{reset_class}",
                    onclick: on_reset,
                    onmouseleave: move |_| confirm.write().disarm(),
                    "{reset_label}"
                }
            }
        }
    }
}

/// Points, section counter, toasts and avatar.
#[component]
pub fn HeaderStats(vm: HeaderVm, toasts: Vec<PointsToast>) -> Element {
    let points = vm.points;
    let counter = vm.counter_label();
    let initials = vm.initials.clone();
    let learner = vm.learner.clone();
    let toasts: Vec<(u64, String)> = toasts.iter().map(|toast| (toast.id, toast.label())).collect();

    rsx! {
        div { class: "header-stats",
            div { class: "points",
                span { class: "points-value", "{points}" }
                span { class: "points-label", " pts" }
                for (id, label) in toasts {
                    span { key: "{id}", class: "points-toast", "{label}" }
                }
            }
            div { class: "section-counter", title: "Sections completed", "{counter}" }
            div { class: "avatar", title: "{learner}", "{initials}" }
        }
    }
}
