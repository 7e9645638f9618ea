use vanguard_core::model::{FlatSection, SectionId, UserProgress};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavItemVm {
    pub id: SectionId,
    pub title: String,
    pub depth: usize,
    pub completed: bool,
    pub active: bool,
}

impl NavItemVm {
    #[must_use]
    pub fn class(&self) -> String {
        let mut class = format!("nav-item nav-depth-{}", self.depth.min(2));
        if self.active {
            class.push_str(" nav-item--active");
        }
        if self.completed {
            class.push_str(" nav-item--done");
        }
        class
    }
}

#[must_use]
pub fn map_nav_items(
    sections: &[FlatSection],
    user: &UserProgress,
    active: &SectionId,
) -> Vec<NavItemVm> {
    sections
        .iter()
        .map(|section| NavItemVm {
            id: section.id.clone(),
            title: section.title.clone(),
            depth: section.depth,
            completed: user.is_section_complete(&section.id),
            active: section.id == *active,
        })
        .collect()
}

/// Percentage of sections completed, for the sidebar meter.
#[must_use]
pub fn completion_percent(user: &UserProgress, total_sections: usize) -> u32 {
    if total_sections == 0 {
        return 0;
    }
    let done = user.completed_sections().len().min(total_sections);
    u32::try_from(done * 100 / total_sections).unwrap_or(100)
}
