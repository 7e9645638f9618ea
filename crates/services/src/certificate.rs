use chrono::{DateTime, Utc};
use vanguard_core::Clock;
use vanguard_core::model::{Curriculum, UserProgress};

/// Completion certificate shown by the celebration panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub learner: String,
    pub course_title: String,
    pub points: u32,
    pub sections_completed: usize,
    pub issued_at: DateTime<Utc>,
}

impl Certificate {
    #[must_use]
    pub fn issue(user: &UserProgress, curriculum: &Curriculum, clock: Clock) -> Self {
        Self {
            learner: user.identity().name.clone(),
            course_title: curriculum.title().to_owned(),
            points: user.points(),
            sections_completed: user.completed_sections().len(),
            issued_at: clock.now(),
        }
    }

    /// e.g. `November 14, 2023`
    #[must_use]
    pub fn date_label(&self) -> String {
        self.issued_at.format("%B %-d, %Y").to_string()
    }

    /// Swap in the name typed on the certificate form; blank keeps the current one.
    #[must_use]
    pub fn with_learner(mut self, name: &str) -> Self {
        let name = name.trim();
        if !name.is_empty() {
            self.learner = name.to_owned();
        }
        self
    }
}

/// Fires once per session when every section is complete.
#[derive(Debug, Clone, Copy, Default)]
pub struct CelebrationGate {
    fired: bool,
}

impl CelebrationGate {
    /// True exactly once, on the first check after the course is complete.
    pub fn check(&mut self, user: &UserProgress, total_sections: usize) -> bool {
        if self.fired || !user.is_course_complete(total_sections) {
            return false;
        }
        self.fired = true;
        true
    }

    /// Re-arm after a progress reset.
    pub fn rearm(&mut self) {
        self.fired = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vanguard_core::model::SectionId;
    use vanguard_core::time::fixed_clock;
    use vanguard_core::vanguard_curriculum;

    fn completed_user(curriculum: &Curriculum) -> UserProgress {
        let mut user = UserProgress::default();
        for section in curriculum.flatten() {
            user.mark_section_complete(section.id);
        }
        user
    }

    #[test]
    fn certificate_uses_clock_date_and_name() {
        let curriculum = vanguard_curriculum().unwrap();
        let cert = Certificate::issue(&completed_user(&curriculum), &curriculum, fixed_clock());
        assert_eq!(cert.date_label(), "November 14, 2023");
        assert_eq!(cert.learner, "Zen Vanguard");
        assert_eq!(cert.sections_completed, curriculum.total_sections());
        assert_eq!(cert.clone().with_learner("  ").learner, "Zen Vanguard");
        assert_eq!(cert.with_learner("Ada").learner, "Ada");
    }

    #[test]
    fn gate_fires_once_when_complete() {
        let curriculum = vanguard_curriculum().unwrap();
        let total = curriculum.total_sections();
        let mut gate = CelebrationGate::default();

        let mut partial = UserProgress::default();
        partial.mark_section_complete(SectionId::root());
        assert!(!gate.check(&partial, total));

        let done = completed_user(&curriculum);
        assert!(gate.check(&done, total));
        assert!(!gate.check(&done, total));
        gate.rearm();
        assert!(gate.check(&done, total));
    }
}
