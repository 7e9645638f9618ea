use std::time::Duration;

use dioxus::document::eval;
use dioxus::prelude::*;
use vanguard_core::model::SectionId;
use vanguard_core::palette::{PaletteKey, PaletteOutcome, PaletteState};

use crate::context::AppContext;
use crate::views::lesson::scripts::focus_element_script;
use crate::views::lesson::{LessonState, navigate_to_section};

pub(crate) const PALETTE_INPUT_ID: &str = "palette-input";
const FOCUS_DELAY: Duration = Duration::from_millis(100);

pub(crate) fn toggle_palette(mut palette: Signal<PaletteState>) {
    palette.write().toggle();
    if palette.peek().is_open() {
        spawn(async move {
            tokio::time::sleep(FOCUS_DELAY).await;
            let _ = eval(&focus_element_script(PALETTE_INPUT_ID)).await;
        });
    }
}

pub(crate) fn palette_key(key: &Key) -> PaletteKey {
    match key {
        Key::ArrowDown => PaletteKey::Down,
        Key::ArrowUp => PaletteKey::Up,
        Key::Enter => PaletteKey::Enter,
        Key::Escape => PaletteKey::Escape,
        _ => PaletteKey::Other,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteRowVm {
    pub id: SectionId,
    pub title: String,
    pub parent: Option<String>,
    pub selected: bool,
}

#[component]
pub fn CommandPalette() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<LessonState>();
    let mut palette = state.palette;
    let sections = ctx.sections();

    if !palette.read().is_open() {
        return rsx! {};
    }

    let (query, rows) = {
        let current = palette.read();
        let cursor = current.cursor().index();
        let rows: Vec<(String, PaletteRowVm)> = current
            .results(&sections)
            .into_iter()
            .enumerate()
            .map(|(index, section)| {
                (
                    section.id.to_string(),
                    PaletteRowVm {
                        id: section.id.clone(),
                        title: section.title.clone(),
                        parent: section.parent_title.clone(),
                        selected: index == cursor,
                    },
                )
            })
            .collect();
        (current.query().to_owned(), rows)
    };
    let empty = rows.is_empty();

    let on_key = move |evt: KeyboardEvent| {
        let key = palette_key(&evt.data.key());
        let outcome = palette.write().handle_key(key, &sections);
        match outcome {
            PaletteOutcome::Moved => evt.prevent_default(),
            PaletteOutcome::Selected(id) => {
                evt.prevent_default();
                navigate_to_section(&id);
            }
            PaletteOutcome::Closed | PaletteOutcome::Ignored => {}
        }
    };

    rsx! {
        div { class: "palette-backdrop", onclick: move |_| palette.write().close(),
            div { class: "palette", onclick: move |evt| evt.stop_propagation(),
                input {
                    id: PALETTE_INPUT_ID,
                    class: "palette-input",
                    r#type: "text",
                    placeholder: "Jump to section...",
                    autocomplete: "off",
                    value: "{query}",
                    oninput: move |evt| palette.write().set_query(evt.value()),
                    onkeydown: on_key,
                }
                ul { class: "palette-results",
                    if empty {
                        li { class: "palette-empty", "No results found." }
                    }
                    for (key, row) in rows {
                        PaletteRow { key: "{key}", row }
                    }
                }
                div { class: "palette-hint", "Jump to ↵" }
            }
        }
    }
}

#[component]
fn PaletteRow(row: PaletteRowVm) -> Element {
    let state = use_context::<LessonState>();
    let mut palette = state.palette;
    let class = if row.selected {
        "palette-row palette-row--selected"
    } else {
        "palette-row"
    };
    let title = row.title.clone();
    let parent = row.parent.clone();
    let id = row.id.clone();

    rsx! {
        li {
            class: "{class}",
            onclick: move |_| {
                palette.write().close();
                navigate_to_section(&id);
            },
            span { class: "palette-title", "{title}" }
            if let Some(parent) = parent {
                span { class: "palette-parent", "{parent}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_navigation_keys() {
        assert_eq!(palette_key(&Key::ArrowDown), PaletteKey::Down);
        assert_eq!(palette_key(&Key::ArrowUp), PaletteKey::Up);
        assert_eq!(palette_key(&Key::Enter), PaletteKey::Enter);
        assert_eq!(palette_key(&Key::Escape), PaletteKey::Escape);
        assert_eq!(palette_key(&Key::Character("k".into())), PaletteKey::Other);
    }
}
