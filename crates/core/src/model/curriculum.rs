use std::collections::HashSet;

use thiserror::Error;

use crate::model::content::ContentItem;
use crate::model::ids::{InteractiveId, SectionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CurriculumError {
    #[error("section id cannot be empty")]
    EmptySectionId,

    #[error("duplicate section id: {0}")]
    DuplicateSectionId(SectionId),

    #[error("duplicate interactive id: {0}")]
    DuplicateInteractiveId(InteractiveId),
}

//
// ─── SECTION TREE ──────────────────────────────────────────────────────────────
//

/// A node in the curriculum tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    id: SectionId,
    title: String,
    icon: Option<String>,
    content: Vec<ContentItem>,
    sub_sections: Vec<Section>,
}

impl Section {
    pub fn new(id: impl Into<SectionId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: None,
            content: Vec::new(),
            sub_sections: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: Vec<ContentItem>) -> Self {
        self.content = content;
        self
    }

    #[must_use]
    pub fn with_sub_sections(mut self, sub_sections: Vec<Section>) -> Self {
        self.sub_sections = sub_sections;
        self
    }

    #[must_use]
    pub fn id(&self) -> &SectionId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    #[must_use]
    pub fn content(&self) -> &[ContentItem] {
        &self.content
    }

    #[must_use]
    pub fn sub_sections(&self) -> &[Section] {
        &self.sub_sections
    }

    /// Content flattened to prose, one block per line.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .filter_map(ContentItem::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A section as it appears in the flattened navigation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatSection {
    pub id: SectionId,
    pub title: String,
    pub parent_title: Option<String>,
    pub depth: usize,
}

impl FlatSection {
    /// `"Parent / Title"` or just the title for top-level sections.
    #[must_use]
    pub fn breadcrumb(&self) -> String {
        match &self.parent_title {
            Some(parent) => format!("{parent} / {}", self.title),
            None => self.title.clone(),
        }
    }
}

/// The full course: validated section tree plus tutor summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Curriculum {
    title: String,
    summary_for_ai: String,
    sections: Vec<Section>,
}

impl Curriculum {
    /// Build a curriculum, enforcing id uniqueness across the whole tree.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumError` on an empty id or a duplicate section or
    /// interactive id anywhere in the tree.
    pub fn new(
        title: impl Into<String>,
        summary_for_ai: impl Into<String>,
        sections: Vec<Section>,
    ) -> Result<Self, CurriculumError> {
        let curriculum = Self {
            title: title.into(),
            summary_for_ai: summary_for_ai.into(),
            sections,
        };
        curriculum.validate()?;
        Ok(curriculum)
    }

    fn validate(&self) -> Result<(), CurriculumError> {
        fn walk<'a>(
            sections: &'a [Section],
            seen_sections: &mut HashSet<&'a SectionId>,
            seen_interactives: &mut HashSet<&'a InteractiveId>,
        ) -> Result<(), CurriculumError> {
            for section in sections {
                if section.id.as_str().trim().is_empty() {
                    return Err(CurriculumError::EmptySectionId);
                }
                if !seen_sections.insert(&section.id) {
                    return Err(CurriculumError::DuplicateSectionId(section.id.clone()));
                }
                for id in section.content.iter().filter_map(ContentItem::interactive_id) {
                    if !seen_interactives.insert(id) {
                        return Err(CurriculumError::DuplicateInteractiveId(id.clone()));
                    }
                }
                walk(&section.sub_sections, seen_sections, seen_interactives)?;
            }
            Ok(())
        }

        walk(&self.sections, &mut HashSet::new(), &mut HashSet::new())
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn summary_for_ai(&self) -> &str {
        &self.summary_for_ai
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Depth-first pre-order list of every section with its parent's title.
    ///
    /// This ordering is shared by the visibility observer, the command palette
    /// and the tutor context selector.
    #[must_use]
    pub fn flatten(&self) -> Vec<FlatSection> {
        fn walk(sections: &[Section], parent: Option<&str>, depth: usize, out: &mut Vec<FlatSection>) {
            for section in sections {
                out.push(FlatSection {
                    id: section.id.clone(),
                    title: section.title.clone(),
                    parent_title: parent.map(str::to_owned),
                    depth,
                });
                walk(&section.sub_sections, Some(&section.title), depth + 1, out);
            }
        }

        let mut out = Vec::new();
        walk(&self.sections, None, 0, &mut out);
        out
    }

    #[must_use]
    pub fn total_sections(&self) -> usize {
        fn count(sections: &[Section]) -> usize {
            sections.iter().map(|s| 1 + count(&s.sub_sections)).sum()
        }
        count(&self.sections)
    }

    /// Find a section anywhere in the tree.
    #[must_use]
    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        fn find<'a>(sections: &'a [Section], id: &SectionId) -> Option<&'a Section> {
            sections.iter().find_map(|section| {
                if &section.id == id {
                    Some(section)
                } else {
                    find(&section.sub_sections, id)
                }
            })
        }
        find(&self.sections, id)
    }

    /// Leading paragraph of the root section, shown as the hero tagline.
    #[must_use]
    pub fn tagline(&self) -> Option<&str> {
        self.section(&SectionId::root())
            .and_then(|root| root.content.first())
            .and_then(|item| match item {
                ContentItem::Paragraph(text) => Some(text.as_str()),
                _ => None,
            })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Curriculum {
        Curriculum::new(
            "Course",
            "summary",
            vec![
                Section::new("overview", "Intro")
                    .with_content(vec![ContentItem::paragraph("Welcome aboard")]),
                Section::new("module-1", "Module 1").with_sub_sections(vec![
                    Section::new("1-1", "Neural Nets").with_content(vec![
                        ContentItem::interactive("ModelExplorer", "explorer-1"),
                    ]),
                    Section::new("1-2", "Training"),
                ]),
                Section::new("module-2", "Module 2"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn flatten_is_depth_first_preorder_with_parent_titles() {
        let flat = tree().flatten();
        let ids: Vec<&str> = flat.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["overview", "module-1", "1-1", "1-2", "module-2"]);
        assert_eq!(flat[2].parent_title.as_deref(), Some("Module 1"));
        assert_eq!(flat[2].depth, 1);
        assert_eq!(flat[0].parent_title, None);
        assert_eq!(flat[2].breadcrumb(), "Module 1 / Neural Nets");
    }

    #[test]
    fn total_sections_counts_descendants() {
        assert_eq!(tree().total_sections(), 5);
    }

    #[test]
    fn section_lookup_descends_into_children() {
        let curriculum = tree();
        let found = curriculum.section(&SectionId::from("1-2")).unwrap();
        assert_eq!(found.title(), "Training");
        assert!(curriculum.section(&SectionId::from("9-9")).is_none());
    }

    #[test]
    fn tagline_is_first_overview_paragraph() {
        assert_eq!(tree().tagline(), Some("Welcome aboard"));
    }

    #[test]
    fn duplicate_id_in_descendant_is_rejected() {
        let err = Curriculum::new(
            "Course",
            "",
            vec![
                Section::new("a", "A").with_sub_sections(vec![Section::new("b", "B")]),
                Section::new("c", "C").with_sub_sections(vec![Section::new("b", "B again")]),
            ],
        )
        .unwrap_err();
        assert_eq!(err, CurriculumError::DuplicateSectionId(SectionId::from("b")));
    }

    #[test]
    fn duplicate_interactive_id_is_rejected() {
        let err = Curriculum::new(
            "Course",
            "",
            vec![
                Section::new("a", "A")
                    .with_content(vec![ContentItem::interactive("X", "lab-1")]),
                Section::new("b", "B")
                    .with_content(vec![ContentItem::interactive("Y", "lab-1")]),
            ],
        )
        .unwrap_err();
        assert_eq!(err, CurriculumError::DuplicateInteractiveId(InteractiveId::from("lab-1")));
    }

    #[test]
    fn empty_id_is_rejected() {
        let err = Curriculum::new("Course", "", vec![Section::new(" ", "Blank")]).unwrap_err();
        assert_eq!(err, CurriculumError::EmptySectionId);
    }
}
