mod content;
mod curriculum;
mod ids;
mod progress;
mod widget;

pub use content::{CodeLanguage, ContentItem};
pub use curriculum::{Curriculum, CurriculumError, FlatSection, Section};
pub use ids::{InteractiveId, ROOT_SECTION_ID, SectionId};
pub use progress::{
    CompletedSet, DEFAULT_EMAIL, DEFAULT_NAME, INTERACTIVE_POINTS, Identity, ProgressError,
    SECTION_POINTS, UserProgress, UserProgressDraft,
};
pub use widget::{AiLabSpec, WidgetKind, predict_score, visible_context};
