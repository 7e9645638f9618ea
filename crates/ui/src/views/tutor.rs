use dioxus::prelude::*;
use services::ai::{ContextSelection, MAX_CONTEXT_SECTIONS, TutorChat, TutorMessage, selectable_sections};
use vanguard_core::model::SectionId;

use crate::context::AppContext;
use crate::views::lesson::LessonState;
use crate::vm::markdown_to_html;

#[derive(Clone, Debug, PartialEq, Eq)]
struct BubbleVm {
    from_user: bool,
    html: String,
}

impl BubbleVm {
    fn class(&self) -> &'static str {
        if self.from_user {
            "bubble bubble--user"
        } else {
            "bubble bubble--bot"
        }
    }
}

fn bubbles(chat: &TutorChat) -> Vec<(usize, BubbleVm)> {
    chat.messages()
        .iter()
        .enumerate()
        .map(|(index, message)| {
            let bubble = match message {
                TutorMessage::User(text) => BubbleVm {
                    from_user: true,
                    html: markdown_to_html(text),
                },
                TutorMessage::Bot(text) => BubbleVm {
                    from_user: false,
                    html: markdown_to_html(text),
                },
            };
            (index, bubble)
        })
        .collect()
}

#[component]
pub fn TutorPanel() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<LessonState>();
    let mut open = state.tutor_open;
    let mut chat = use_signal(TutorChat::default);
    let mut selection = use_signal(ContextSelection::default);
    let mut draft = use_signal(String::new);
    let mut picker_open = use_signal(|| false);
    let mut picker_query = use_signal(String::new);
    let mut notice = use_signal(|| None::<String>);

    let tutor = ctx.tutor();
    let send = use_callback(move |()| {
        let question = draft.peek().trim().to_owned();
        let Some(history) = chat.write().begin(&question) else {
            return;
        };
        draft.set(String::new());
        let tutor = tutor.clone();
        let pinned = selection.peek().clone();
        spawn(async move {
            let reply = tutor.reply(&pinned, history, &question).await;
            chat.write().finish(reply);
        });
    });

    if !open() {
        return rsx! {
            button { class: "tutor-fab", onclick: move |_| open.set(true), "Ask the ZEN AI Tutor" }
        };
    }

    let sections = ctx.sections();
    let loading = chat.read().is_loading();
    let messages: Vec<(usize, &'static str, String)> = bubbles(&chat.read())
        .into_iter()
        .map(|(index, bubble)| (index, bubble.class(), bubble.html))
        .collect();
    let pinned: Vec<(String, SectionId, String)> = selection
        .read()
        .ids()
        .iter()
        .map(|id| {
            let title = sections
                .iter()
                .find(|section| section.id == *id)
                .map_or_else(|| id.to_string(), |section| section.title.clone());
            (id.to_string(), id.clone(), title)
        })
        .collect();
    let candidates: Vec<(String, SectionId, String, bool)> =
        selectable_sections(&sections, &picker_query.read())
            .into_iter()
            .map(|section| {
                let checked = selection.read().contains(&section.id);
                (section.id.to_string(), section.id.clone(), section.breadcrumb(), checked)
            })
            .collect();
    let pinned_label = format!("Context ({}/{MAX_CONTEXT_SECTIONS})", pinned.len());

    rsx! {
        div { class: "tutor",
            div { class: "tutor-header",
                h3 { "ZEN AI Tutor" }
                button { class: "btn btn-ghost", onclick: move |_| open.set(false), "Close" }
            }
            div { class: "tutor-context",
                span { class: "tutor-context-label", "{pinned_label}" }
                for (key, id, title) in pinned {
                    button {
                        key: "{key}",
                        class: "chip",
                        onclick: move |_| {
                            let _ = selection.write().toggle(id.clone());
                        },
                        "{title} ×"
                    }
                }
                button { class: "chip chip--add", onclick: move |_| picker_open.toggle(), "+" }
            }
            if picker_open() {
                div { class: "tutor-picker",
                    input {
                        r#type: "text",
                        placeholder: "Search sections...",
                        value: "{picker_query}",
                        oninput: move |evt| picker_query.set(evt.value()),
                    }
                    if let Some(message) = notice() {
                        p { class: "tutor-notice", "{message}" }
                    }
                    ul {
                        for (key, id, crumb, checked) in candidates {
                            li { key: "{key}",
                                label {
                                    input {
                                        r#type: "checkbox",
                                        checked,
                                        onchange: move |_| {
                                            match selection.write().toggle(id.clone()) {
                                                Ok(_) => notice.set(None),
                                                Err(full) => notice.set(Some(full.to_string())),
                                            }
                                        },
                                    }
                                    " {crumb}"
                                }
                            }
                        }
                    }
                }
            }
            div { class: "tutor-messages",
                for (index, class, html) in messages {
                    div { key: "{index}", class: "{class}", dangerous_inner_html: "{html}" }
                }
                if loading {
                    div { class: "bubble bubble--bot bubble--pending", "Thinking..." }
                }
            }
            div { class: "tutor-input",
                input {
                    r#type: "text",
                    placeholder: "Ask a question...",
                    value: "{draft}",
                    disabled: loading,
                    oninput: move |evt| draft.set(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.data.key() == Key::Enter {
                            evt.prevent_default();
                            send.call(());
                        }
                    },
                }
                button { class: "btn btn-primary", disabled: loading, onclick: move |_| send.call(()), "Send" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::ai::WELCOME_MESSAGE;

    #[test]
    fn bubbles_render_markdown_per_speaker() {
        let mut chat = TutorChat::default();
        chat.begin("What is **attention**?").unwrap();
        chat.finish(Ok("It weighs tokens.".into()));

        let rendered = bubbles(&chat);
        assert_eq!(rendered.len(), 3);
        assert!(!rendered[0].1.from_user);
        assert!(rendered[0].1.html.contains(&WELCOME_MESSAGE[..6]));
        assert!(rendered[1].1.from_user);
        assert!(rendered[1].1.html.contains("<strong>attention</strong>"));
    }
}
