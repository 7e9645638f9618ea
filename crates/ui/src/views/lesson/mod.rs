mod actions;
mod content;
mod hooks;
pub(crate) mod scripts;
mod state;
mod view;

pub(crate) use actions::{award_interactive, navigate_to_section, reset_progress};
pub use content::{ContentBlock, SectionBlock};
pub use state::{LessonState, LessonTracker};
pub use view::LessonView;
