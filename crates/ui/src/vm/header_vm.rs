use vanguard_core::model::UserProgress;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderVm {
    pub points: u32,
    pub completed: usize,
    pub total: usize,
    pub initials: String,
    pub learner: String,
}

impl HeaderVm {
    #[must_use]
    pub fn counter_label(&self) -> String {
        format!("{}/{}", self.completed, self.total)
    }
}

#[must_use]
pub fn map_header(user: &UserProgress, total_sections: usize) -> HeaderVm {
    HeaderVm {
        points: user.points(),
        completed: user.completed_sections().len().min(total_sections),
        total: total_sections,
        initials: user.identity().initials(),
        learner: user.identity().name.clone(),
    }
}

/// Floating "+N" badge shown after points are awarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointsToast {
    pub id: u64,
    pub amount: u32,
}

impl PointsToast {
    #[must_use]
    pub fn label(&self) -> String {
        format!("+{}", self.amount)
    }
}

/// Two-click reset: the first click arms, the second confirms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResetConfirm {
    #[default]
    Idle,
    Armed,
}

impl ResetConfirm {
    /// Returns true when this click should reset progress.
    pub fn click(&mut self) -> bool {
        match self {
            Self::Idle => {
                *self = Self::Armed;
                false
            }
            Self::Armed => {
                *self = Self::Idle;
                true
            }
        }
    }

    pub fn disarm(&mut self) {
        *self = Self::Idle;
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Reset progress",
            Self::Armed => "Click again to confirm",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vanguard_core::model::SectionId;

    #[test]
    fn header_counts_and_initials() {
        let mut user = UserProgress::default();
        user.mark_section_complete(SectionId::from("overview"));
        user.mark_section_complete(SectionId::from("1-1"));
        user.add_points(20).unwrap();

        let vm = map_header(&user, 24);
        assert_eq!(vm.points, 20);
        assert_eq!(vm.counter_label(), "2/24");
        assert_eq!(vm.initials, "ZV");
    }

    #[test]
    fn reset_needs_two_clicks() {
        let mut confirm = ResetConfirm::default();
        assert!(!confirm.click());
        assert_eq!(confirm.label(), "Click again to confirm");
        assert!(confirm.click());
        assert_eq!(confirm, ResetConfirm::Idle);

        confirm.click();
        confirm.disarm();
        assert!(!confirm.click());
    }

    #[test]
    fn toast_label_has_plus_sign() {
        assert_eq!(PointsToast { id: 1, amount: 25 }.label(), "+25");
    }
}
