use dioxus::prelude::*;
use vanguard_core::model::{ContentItem, SectionId};

use super::state::LessonState;
use crate::context::AppContext;
use crate::views::widgets::Widget;

fn section_class(depth: usize, revealed: bool, completed: bool) -> String {
    let mut class = format!("section section--depth-{}", depth.min(2));
    if revealed {
        class.push_str(" is-visible");
    }
    if completed {
        class.push_str(" is-complete");
    }
    class
}

fn icon_glyph(name: &str) -> &'static str {
    match name {
        "BookOpen" => "📖",
        "Sparkles" => "✨",
        "CubeTransparent" => "🧊",
        _ => "•",
    }
}

/// One observed section: its heading and its own content blocks. Children are
/// rendered as following siblings so each element covers only its own text.
#[component]
pub fn SectionBlock(id: SectionId, depth: usize) -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<LessonState>();
    let curriculum = ctx.curriculum();
    let Some(section) = curriculum.section(&id) else {
        return rsx! {};
    };

    let revealed = state.revealed.read().contains(&id);
    let completed = state.user.read().is_section_complete(&id);
    let class = section_class(depth, revealed, completed);
    let dom_id = id.to_string();
    let title = section.title().to_owned();
    let icon = section.icon().map(icon_glyph);
    let items: Vec<(String, ContentItem)> = section
        .content()
        .iter()
        .enumerate()
        .map(|(index, item)| (format!("{dom_id}-{index}"), item.clone()))
        .collect();

    rsx! {
        section { id: "{dom_id}", class: "{class}", "data-section": "true",
            header { class: "section-header",
                if let Some(icon) = icon {
                    span { class: "section-icon", "{icon}" }
                }
                if depth == 0 {
                    h2 { class: "section-title", "{title}" }
                } else {
                    h3 { class: "section-title", "{title}" }
                }
                if completed {
                    span { class: "section-done", "Completed" }
                }
            }
            for (key, item) in items {
                ContentBlock { key: "{key}", item }
            }
        }
    }
}

#[component]
pub fn ContentBlock(item: ContentItem) -> Element {
    match item {
        ContentItem::Paragraph(text) => rsx! {
            p { class: "content-paragraph", "{text}" }
        },
        ContentItem::Heading(text) => rsx! {
            h4 { class: "content-heading", "{text}" }
        },
        ContentItem::List(entries) => rsx! {
            ul { class: "content-list",
                for (index, entry) in entries.into_iter().enumerate() {
                    li { key: "{index}", "{entry}" }
                }
            }
        },
        ContentItem::Code {
            language,
            source,
            output,
        } => {
            let language = language.as_str();
            rsx! {
                div { class: "code-block",
                    div { class: "code-language", "{language}" }
                    pre {
                        code { class: "language-{language}", "{source}" }
                    }
                    if let Some(output) = output {
                        pre { class: "code-output", "{output}" }
                    }
                }
            }
        }
        ContentItem::Terminal(text) => rsx! {
            pre { class: "terminal", "{text}" }
        },
        ContentItem::Quote(text) => rsx! {
            blockquote { class: "content-quote", "{text}" }
        },
        ContentItem::Image { src, alt } => rsx! {
            figure { class: "content-image",
                img { src: "{src}", alt: "{alt}" }
            }
        },
        ContentItem::Interactive {
            component,
            interactive_id,
        } => rsx! {
            Widget { kind: component, interactive_id }
        },
    }
}
