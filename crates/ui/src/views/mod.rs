mod celebration;
mod header;
mod lesson;
mod palette;
mod shell;
mod sidebar;
mod state;
mod tutor;
mod widgets;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use celebration::{CelebrationPanel, CertificateCard};
pub use header::{Header, HeaderStats};
pub use lesson::{ContentBlock, LessonState, LessonView, SectionBlock};
pub use palette::CommandPalette;
pub use shell::Shell;
pub use sidebar::{NavLink, Sidebar};
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use tutor::TutorPanel;
pub use widgets::{LabResult, Widget, WidgetPlaceholder};
