use thiserror::Error;

use crate::model::ids::{InteractiveId, SectionId};

/// Points awarded the first time a section enters the trigger band.
pub const SECTION_POINTS: u32 = 10;

/// Points awarded the first time an interactive widget is completed.
pub const INTERACTIVE_POINTS: u32 = 25;

pub const DEFAULT_EMAIL: &str = "user@example.com";
pub const DEFAULT_NAME: &str = "Zen Vanguard";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("point awards must be positive")]
    ZeroPoints,
}

//
// ─── COMPLETED SET ─────────────────────────────────────────────────────────────
//

/// Insertion-ordered set with idempotent insert. Never shrinks except via `clear`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSet<T> {
    items: Vec<T>,
}

impl<T> Default for CompletedSet<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: PartialEq> CompletedSet<T> {
    /// Inserts `item` unless already present. Returns true when newly inserted.
    pub fn insert(&mut self, item: T) -> bool {
        if self.items.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: PartialEq> FromIterator<T> for CompletedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

//
// ─── USER PROGRESS ─────────────────────────────────────────────────────────────
//

/// Mock identity; never authenticated against a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub name: String,
    pub picture: String,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            email: DEFAULT_EMAIL.to_owned(),
            name: DEFAULT_NAME.to_owned(),
            picture: String::new(),
        }
    }
}

impl Identity {
    /// Two-letter avatar initials: first and last word, else the first two
    /// characters, else `ZV`.
    #[must_use]
    pub fn initials(&self) -> String {
        let words: Vec<&str> = self.name.split_whitespace().collect();
        match words.as_slice() {
            [] => "ZV".to_owned(),
            [single] => single.chars().take(2).collect::<String>().to_uppercase(),
            [first, .., last] => first
                .chars()
                .take(1)
                .chain(last.chars().take(1))
                .collect::<String>()
                .to_uppercase(),
        }
    }
}

/// Raw parts used to rebuild a record from storage.
#[derive(Debug, Clone, Default)]
pub struct UserProgressDraft {
    pub identity: Identity,
    pub points: u32,
    pub completed_sections: Vec<SectionId>,
    pub completed_interactives: Vec<InteractiveId>,
    pub last_viewed_section: Option<SectionId>,
}

/// The persisted per-installation user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProgress {
    identity: Identity,
    points: u32,
    completed_sections: CompletedSet<SectionId>,
    completed_interactives: CompletedSet<InteractiveId>,
    last_viewed_section: SectionId,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            identity: Identity::default(),
            points: 0,
            completed_sections: CompletedSet::default(),
            completed_interactives: CompletedSet::default(),
            last_viewed_section: SectionId::root(),
        }
    }
}

impl UserProgress {
    /// Rebuild from storage; a missing or empty last-viewed section falls back
    /// to the root.
    #[must_use]
    pub fn from_persisted(draft: UserProgressDraft) -> Self {
        Self {
            identity: draft.identity,
            points: draft.points,
            completed_sections: draft.completed_sections.into_iter().collect(),
            completed_interactives: draft.completed_interactives.into_iter().collect(),
            last_viewed_section: draft
                .last_viewed_section
                .filter(|id| !id.as_str().is_empty())
                .unwrap_or_else(SectionId::root),
        }
    }

    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    #[must_use]
    pub fn completed_sections(&self) -> &CompletedSet<SectionId> {
        &self.completed_sections
    }

    #[must_use]
    pub fn completed_interactives(&self) -> &CompletedSet<InteractiveId> {
        &self.completed_interactives
    }

    #[must_use]
    pub fn last_viewed_section(&self) -> &SectionId {
        &self.last_viewed_section
    }

    #[must_use]
    pub fn is_section_complete(&self, id: &SectionId) -> bool {
        self.completed_sections.contains(id)
    }

    #[must_use]
    pub fn is_interactive_complete(&self, id: &InteractiveId) -> bool {
        self.completed_interactives.contains(id)
    }

    /// True once every section of the course has been completed.
    #[must_use]
    pub fn is_course_complete(&self, total_sections: usize) -> bool {
        total_sections > 0 && self.completed_sections.len() >= total_sections
    }

    pub fn mark_section_complete(&mut self, id: SectionId) -> bool {
        self.completed_sections.insert(id)
    }

    pub fn mark_interactive_complete(&mut self, id: InteractiveId) -> bool {
        self.completed_interactives.insert(id)
    }

    /// Adds `amount` points, saturating at `u32::MAX`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::ZeroPoints` when `amount` is zero.
    pub fn add_points(&mut self, amount: u32) -> Result<u32, ProgressError> {
        if amount == 0 {
            return Err(ProgressError::ZeroPoints);
        }
        self.points = self.points.saturating_add(amount);
        Ok(self.points)
    }

    /// Returns true when the value actually changed.
    pub fn set_last_viewed_section(&mut self, id: SectionId) -> bool {
        if self.last_viewed_section == id {
            return false;
        }
        self.last_viewed_section = id;
        true
    }

    /// Back to defaults, keeping the identity fields.
    pub fn reset(&mut self) {
        self.points = 0;
        self.completed_sections.clear();
        self.completed_interactives.clear();
        self.last_viewed_section = SectionId::root();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_matches_fresh_install() {
        let user = UserProgress::default();
        assert_eq!(user.points(), 0);
        assert!(user.completed_sections().is_empty());
        assert!(user.completed_interactives().is_empty());
        assert_eq!(user.last_viewed_section(), &SectionId::root());
        assert_eq!(user.identity().email, DEFAULT_EMAIL);
    }

    #[test]
    fn marking_a_section_is_idempotent() {
        let mut user = UserProgress::default();
        assert!(user.mark_section_complete(SectionId::from("1-1")));
        for _ in 0..5 {
            assert!(!user.mark_section_complete(SectionId::from("1-1")));
        }
        assert_eq!(user.completed_sections().len(), 1);
    }

    #[test]
    fn section_and_interactive_namespaces_are_separate() {
        let mut user = UserProgress::default();
        user.mark_section_complete(SectionId::from("x"));
        assert!(user.mark_interactive_complete(InteractiveId::from("x")));
        assert!(user.is_section_complete(&SectionId::from("x")));
        assert!(user.is_interactive_complete(&InteractiveId::from("x")));
    }

    #[test]
    fn zero_points_are_rejected() {
        let mut user = UserProgress::default();
        assert_eq!(user.add_points(0), Err(ProgressError::ZeroPoints));
        assert_eq!(user.add_points(10), Ok(10));
        assert_eq!(user.add_points(25), Ok(35));
    }

    #[test]
    fn last_viewed_only_reports_real_changes() {
        let mut user = UserProgress::default();
        assert!(!user.set_last_viewed_section(SectionId::root()));
        assert!(user.set_last_viewed_section(SectionId::from("1-2")));
        assert!(!user.set_last_viewed_section(SectionId::from("1-2")));
    }

    #[test]
    fn reset_clears_progress_but_keeps_identity() {
        let mut user = UserProgress::from_persisted(UserProgressDraft {
            identity: Identity {
                email: "ada@example.com".into(),
                name: "Ada Lovelace".into(),
                picture: "pic.svg".into(),
            },
            points: 120,
            completed_sections: vec![SectionId::from("1-1")],
            completed_interactives: vec![InteractiveId::from("lab-1")],
            last_viewed_section: Some(SectionId::from("1-1")),
        });
        user.reset();
        assert_eq!(user.points(), 0);
        assert!(user.completed_sections().is_empty());
        assert!(user.completed_interactives().is_empty());
        assert_eq!(user.last_viewed_section(), &SectionId::root());
        assert_eq!(user.identity().email, "ada@example.com");
        assert_eq!(user.identity().name, "Ada Lovelace");
        assert_eq!(user.identity().picture, "pic.svg");
    }

    #[test]
    fn from_persisted_dedupes_and_defaults_last_viewed() {
        let user = UserProgress::from_persisted(UserProgressDraft {
            completed_sections: vec![SectionId::from("a"), SectionId::from("a")],
            ..UserProgressDraft::default()
        });
        assert_eq!(user.completed_sections().len(), 1);
        assert_eq!(user.last_viewed_section(), &SectionId::root());
    }

    #[test]
    fn from_persisted_treats_empty_last_viewed_as_missing() {
        let user = UserProgress::from_persisted(UserProgressDraft {
            last_viewed_section: Some(SectionId::from("")),
            ..UserProgressDraft::default()
        });
        assert_eq!(user.last_viewed_section(), &SectionId::root());
    }

    #[test]
    fn course_completion_needs_every_section() {
        let mut user = UserProgress::default();
        assert!(!user.is_course_complete(0));
        user.mark_section_complete(SectionId::from("a"));
        assert!(!user.is_course_complete(2));
        user.mark_section_complete(SectionId::from("b"));
        assert!(user.is_course_complete(2));
    }

    #[test]
    fn initials_follow_name_shape() {
        let mut identity = Identity::default();
        assert_eq!(identity.initials(), "ZV");
        identity.name = "ada byron lovelace".into();
        assert_eq!(identity.initials(), "AL");
        identity.name = "plato".into();
        assert_eq!(identity.initials(), "PL");
        identity.name = "   ".into();
        assert_eq!(identity.initials(), "ZV");
    }
}
