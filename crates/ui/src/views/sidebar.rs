use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::lesson::{LessonState, navigate_to_section};
use crate::vm::{NavItemVm, completion_percent, map_nav_items};

#[component]
pub fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<LessonState>();
    let sections = ctx.sections();

    let user = state.user.read();
    let items: Vec<(String, NavItemVm)> =
        map_nav_items(&sections, &user, &state.active.read())
            .into_iter()
            .map(|item| (item.id.to_string(), item))
            .collect();
    let percent = completion_percent(&user, sections.len());
    drop(user);

    rsx! {
        aside { class: "sidebar",
            div { class: "sidebar-progress",
                span { "Course progress" }
                span { class: "sidebar-percent", "{percent}%" }
                div { class: "meter",
                    div { class: "meter-fill", style: "width: {percent}%" }
                }
            }
            nav { class: "sidebar-nav",
                for (key, item) in items {
                    NavLink { key: "{key}", item }
                }
            }
        }
    }
}

#[component]
pub fn NavLink(item: NavItemVm) -> Element {
    let class = item.class();
    let title = item.title.clone();
    let completed = item.completed;
    let id = item.id.clone();

    rsx! {
        button { class: "{class}", onclick: move |_| navigate_to_section(&id),
            if completed {
                span { class: "nav-check", "✓" }
            }
            span { class: "nav-title", "{title}" }
        }
    }
}
