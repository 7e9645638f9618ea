//! Floating AI tutor: chat history, context section selection and prompt
//! assembly.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;
use vanguard_core::model::{Curriculum, FlatSection, SectionId};
use vanguard_core::palette::filter_sections;

use super::client::{AiClientFactory, ChatMessage};
use crate::error::AiError;

pub const MAX_CONTEXT_SECTIONS: usize = 5;

pub const WELCOME_MESSAGE: &str = "Hello! I'm the ZEN AI Tutor. Ask me anything about the \
curriculum. You can add specific sections as context using the plus icon.";

pub const TUTOR_ERROR_MESSAGE: &str =
    "Sorry, I'm having trouble connecting right now. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TutorMessage {
    Bot(String),
    User(String),
}

impl TutorMessage {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Bot(text) | Self::User(text) => text,
        }
    }

    #[must_use]
    pub fn is_user(&self) -> bool {
        matches!(self, Self::User(_))
    }
}

/// Conversation state with a loading gate against duplicate sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorChat {
    messages: Vec<TutorMessage>,
    loading: bool,
}

impl Default for TutorChat {
    fn default() -> Self {
        Self {
            messages: vec![TutorMessage::Bot(WELCOME_MESSAGE.to_owned())],
            loading: false,
        }
    }
}

impl TutorChat {
    #[must_use]
    pub fn messages(&self) -> &[TutorMessage] {
        &self.messages
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Record the question and return the prior history to send with it.
    ///
    /// Returns `None` for blank input or while a reply is pending. The welcome
    /// message is never part of the history.
    pub fn begin(&mut self, question: &str) -> Option<Vec<ChatMessage>> {
        if question.trim().is_empty() || self.loading {
            return None;
        }
        let history = self
            .messages
            .iter()
            .skip(1)
            .map(|message| match message {
                TutorMessage::User(text) => ChatMessage::user(text.clone()),
                TutorMessage::Bot(text) => ChatMessage::assistant(text.clone()),
            })
            .collect();
        self.messages.push(TutorMessage::User(question.to_owned()));
        self.loading = true;
        Some(history)
    }

    /// Append the reply, or the inline error message on failure.
    pub fn finish(&mut self, reply: Result<String, AiError>) {
        let text = match reply {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "tutor request failed");
                TUTOR_ERROR_MESSAGE.to_owned()
            }
        };
        self.messages.push(TutorMessage::Bot(text));
        self.loading = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("at most {MAX_CONTEXT_SECTIONS} context sections can be selected")]
pub struct SelectionFull;

/// Sections the learner pinned as tutor context, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextSelection {
    ids: Vec<SectionId>,
}

impl ContextSelection {
    #[must_use]
    pub fn ids(&self) -> &[SectionId] {
        &self.ids
    }

    #[must_use]
    pub fn contains(&self, id: &SectionId) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_CONTEXT_SECTIONS
    }

    /// Add or remove `id`. Returns whether it is selected afterwards.
    ///
    /// # Errors
    ///
    /// Returns `SelectionFull` when adding beyond the cap.
    pub fn toggle(&mut self, id: SectionId) -> Result<bool, SelectionFull> {
        if let Some(pos) = self.ids.iter().position(|existing| *existing == id) {
            self.ids.remove(pos);
            return Ok(false);
        }
        if self.is_full() {
            return Err(SelectionFull);
        }
        self.ids.push(id);
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

/// Candidates for the context picker: palette filtering minus the overview.
#[must_use]
pub fn selectable_sections<'a>(sections: &'a [FlatSection], query: &str) -> Vec<&'a FlatSection> {
    filter_sections(sections, query)
        .into_iter()
        .filter(|section| !section.id.is_root())
        .collect()
}

/// Context text for the system instruction.
#[must_use]
pub fn build_context(curriculum: &Curriculum, selection: &ContextSelection) -> String {
    if selection.ids().is_empty() {
        return format!(
            "The user has not selected a specific section. Use this general summary of the \
             entire curriculum for context:\n\n{}",
            curriculum.summary_for_ai()
        );
    }

    let blocks: Vec<String> = curriculum
        .flatten()
        .into_iter()
        .filter(|flat| selection.contains(&flat.id))
        .filter_map(|flat| {
            curriculum
                .section(&flat.id)
                .map(|section| format!("--- SECTION: {} ---\n{}", flat.breadcrumb(), section.plain_text()))
        })
        .collect();

    format!(
        "The user has provided the following specific sections as context for their question. \
         Base your answer primarily on this information:\n\n{}",
        blocks.join("\n\n")
    )
}

#[must_use]
pub fn system_instruction(context: &str) -> String {
    format!(
        "You are a friendly and helpful AI Tutor for the \"ZEN AI VANGUARD\". Your goal is to \
         help students understand the curriculum. Be encouraging and clear in your explanations. \
         Do not answer questions unrelated to the curriculum. Here is the context for the user's \
         question:\n\n{context}"
    )
}

/// Sends tutor questions through the shared AI client.
#[derive(Clone)]
pub struct TutorService {
    factory: Arc<AiClientFactory>,
    curriculum: Arc<Curriculum>,
}

impl TutorService {
    #[must_use]
    pub fn new(factory: Arc<AiClientFactory>, curriculum: Arc<Curriculum>) -> Self {
        Self {
            factory,
            curriculum,
        }
    }

    /// Message list sent for one question.
    #[must_use]
    pub fn request_messages(
        &self,
        selection: &ContextSelection,
        history: Vec<ChatMessage>,
        question: &str,
    ) -> Vec<ChatMessage> {
        let context = build_context(&self.curriculum, selection);
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(system_instruction(&context)));
        messages.extend(history);
        messages.push(ChatMessage::user(question));
        messages
    }

    /// Ask the tutor.
    ///
    /// # Errors
    ///
    /// Returns `AiError` for a missing credential or a failed request.
    pub async fn reply(
        &self,
        selection: &ContextSelection,
        history: Vec<ChatMessage>,
        question: &str,
    ) -> Result<String, AiError> {
        let client = self.factory.client()?;
        let messages = self.request_messages(selection, history, question);
        client.chat(&messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AiConfig, ChatRole};
    use vanguard_core::vanguard_curriculum;

    #[test]
    fn history_skips_welcome_and_gates_duplicates() {
        let mut chat = TutorChat::default();
        assert!(chat.begin("   ").is_none());
        let history = chat.begin("What is attention?").unwrap();
        assert!(history.is_empty());
        assert!(chat.is_loading());
        assert!(chat.begin("again?").is_none());

        chat.finish(Ok("Weighing tokens.".into()));
        let history = chat.begin("And context windows?").unwrap();
        assert_eq!(
            history,
            vec![
                ChatMessage::user("What is attention?"),
                ChatMessage::assistant("Weighing tokens."),
            ]
        );
    }

    #[test]
    fn failure_appends_inline_error() {
        let mut chat = TutorChat::default();
        chat.begin("hi").unwrap();
        chat.finish(Err(AiError::MissingCredential));
        assert_eq!(chat.messages().last().map(TutorMessage::text), Some(TUTOR_ERROR_MESSAGE));
        assert!(!chat.is_loading());
    }

    #[test]
    fn selection_is_capped_at_five() {
        let mut selection = ContextSelection::default();
        for i in 0..MAX_CONTEXT_SECTIONS {
            assert_eq!(selection.toggle(SectionId::new(format!("1-{i}"))), Ok(true));
        }
        assert_eq!(selection.toggle(SectionId::from("2-1")), Err(SelectionFull));
        assert_eq!(selection.toggle(SectionId::from("1-0")), Ok(false));
        assert_eq!(selection.toggle(SectionId::from("2-1")), Ok(true));
        assert_eq!(selection.ids().len(), MAX_CONTEXT_SECTIONS);
    }

    #[test]
    fn picker_never_offers_overview() {
        let curriculum = vanguard_curriculum().unwrap();
        let flat = curriculum.flatten();
        assert!(selectable_sections(&flat, "").iter().all(|s| !s.id.is_root()));
        assert!(selectable_sections(&flat, "overview").is_empty());
    }

    #[test]
    fn context_uses_summary_or_selected_sections() {
        let curriculum = vanguard_curriculum().unwrap();
        let mut selection = ContextSelection::default();
        assert!(build_context(&curriculum, &selection).contains(curriculum.summary_for_ai()));

        selection.toggle(SectionId::from("1-5")).unwrap();
        let context = build_context(&curriculum, &selection);
        assert!(context.contains(
            "--- SECTION: Module 1: The Intelligence Inside / 1.5 Vulnerability and Security ---"
        ));
        assert!(context.contains("panda"));
    }

    #[test]
    fn request_starts_with_system_instruction() {
        let service = TutorService::new(
            Arc::new(AiClientFactory::new(AiConfig::default())),
            Arc::new(vanguard_curriculum().unwrap()),
        );
        let messages = service.request_messages(
            &ContextSelection::default(),
            vec![ChatMessage::user("q1"), ChatMessage::assistant("a1")],
            "q2",
        );
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, ChatRole::System);
        assert!(messages[0].content.starts_with("You are a friendly and helpful AI Tutor"));
        assert_eq!(messages[3], ChatMessage::user("q2"));
    }

    #[tokio::test]
    async fn reply_without_key_fails_fast() {
        let service = TutorService::new(
            Arc::new(AiClientFactory::new(AiConfig::default())),
            Arc::new(vanguard_curriculum().unwrap()),
        );
        let err = service
            .reply(&ContextSelection::default(), Vec::new(), "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::MissingCredential));
    }
}
