//! Command palette: section search plus a bounded keyboard cursor.

use crate::model::{FlatSection, SectionId};

/// Case-insensitive substring match on title or parent title.
///
/// The query is matched as typed. Only an empty query returns every section,
/// in flattening order.
#[must_use]
pub fn filter_sections<'a>(sections: &'a [FlatSection], query: &str) -> Vec<&'a FlatSection> {
    if query.is_empty() {
        return sections.iter().collect();
    }
    let needle = query.to_lowercase();
    sections
        .iter()
        .filter(|section| {
            section.title.to_lowercase().contains(&needle)
                || section
                    .parent_title
                    .as_deref()
                    .is_some_and(|parent| parent.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Highlight index into the filtered list. Never wraps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaletteCursor {
    index: usize,
}

impl PaletteCursor {
    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }

    /// Move down, stopping at the last of `len` results.
    pub fn down(&mut self, len: usize) {
        self.index = (self.index + 1).min(len.saturating_sub(1));
    }

    /// Move up, stopping at the first result.
    pub fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

/// Keys the palette reacts to while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKey {
    Up,
    Down,
    Enter,
    Escape,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteOutcome {
    Moved,
    /// Navigate to the section; the palette has already closed.
    Selected(SectionId),
    Closed,
    Ignored,
}

/// Open/closed flag, query text and cursor over a fixed section list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteState {
    open: bool,
    query: String,
    cursor: PaletteCursor,
}

impl PaletteState {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn cursor(&self) -> PaletteCursor {
        self.cursor
    }

    /// Open with an empty query and the cursor on the first result.
    pub fn open(&mut self) {
        self.open = true;
        self.query.clear();
        self.cursor.reset();
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.cursor.reset();
        }
    }

    /// Current filtered results.
    #[must_use]
    pub fn results<'a>(&self, sections: &'a [FlatSection]) -> Vec<&'a FlatSection> {
        filter_sections(sections, &self.query)
    }

    /// Apply a key press against `sections`. Closed palettes ignore everything.
    pub fn handle_key(&mut self, key: PaletteKey, sections: &[FlatSection]) -> PaletteOutcome {
        if !self.open {
            return PaletteOutcome::Ignored;
        }
        match key {
            PaletteKey::Down => {
                let len = self.results(sections).len();
                self.cursor.down(len);
                PaletteOutcome::Moved
            }
            PaletteKey::Up => {
                self.cursor.up();
                PaletteOutcome::Moved
            }
            PaletteKey::Enter => {
                let selected = self
                    .results(sections)
                    .get(self.cursor.index())
                    .map(|section| section.id.clone());
                match selected {
                    Some(id) => {
                        self.close();
                        PaletteOutcome::Selected(id)
                    }
                    None => PaletteOutcome::Ignored,
                }
            }
            PaletteKey::Escape => {
                self.close();
                PaletteOutcome::Closed
            }
            PaletteKey::Other => PaletteOutcome::Ignored,
        }
    }
}

/// Cmd/Ctrl+K always toggles; a bare `/` only when focus is outside text fields.
#[must_use]
pub fn is_palette_shortcut(key: &str, command_held: bool, focus_in_text_field: bool) -> bool {
    if command_held && key.eq_ignore_ascii_case("k") {
        return true;
    }
    key == "/" && !command_held && !focus_in_text_field
}
