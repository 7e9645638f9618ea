pub mod client;
pub mod tutor;

pub use client::{AiClient, AiClientFactory, AiConfig, ChatMessage, ChatRole};
pub use tutor::{
    ContextSelection, MAX_CONTEXT_SECTIONS, SelectionFull, TUTOR_ERROR_MESSAGE, TutorChat,
    TutorMessage, TutorService, WELCOME_MESSAGE, build_context, selectable_sections,
};
