use vanguard_core::model::AiLabSpec;

use super::markdown_vm::markdown_to_html;

pub const LAB_ERROR_MESSAGE: &str = "Sorry, I'm having trouble connecting right now.";

/// Sample document for the context window lab.
pub const CONTEXT_SAMPLE: &str = "Artificial intelligence (AI) is intelligence demonstrated by \
machines, as opposed to the natural intelligence displayed by humans. AI research has been \
defined as the field of study of intelligent agents, which refers to any system that perceives \
its environment and takes actions that maximize its chance of successfully achieving its goals. \
The term \"artificial intelligence\" had previously been used to describe machines that mimic \
and display \"human\" cognitive skills.";

/// What a lab shows below its controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LabOutput {
    Empty,
    Loading,
    Answer { html: String },
    Failed,
}

impl LabOutput {
    #[must_use]
    pub fn answer(markdown: &str) -> Self {
        Self::Answer {
            html: markdown_to_html(markdown),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Prompt for a free-text lab, or `None` when the input is blank.
#[must_use]
pub fn lab_request(spec: &AiLabSpec, input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    Some(format!("{}\n\n{input}", spec.instruction))
}

/// Prompt for summarizing the part of the sample inside the window.
#[must_use]
pub fn context_summary_request(excerpt: &str) -> Option<String> {
    if excerpt.trim().is_empty() {
        return None;
    }
    Some(format!(
        "Concisely summarize the key points from the following text excerpt (ignore cut-off \
         sentences):\n\n\"{excerpt}\""
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vanguard_core::model::WidgetKind;

    fn summarizer() -> AiLabSpec {
        match WidgetKind::from_component_name("MeetingSummarizer") {
            WidgetKind::AiLab(spec) => spec,
            other => panic!("unexpected widget {other:?}"),
        }
    }

    #[test]
    fn blank_input_sends_nothing() {
        assert_eq!(lab_request(&summarizer(), "   \n"), None);
        assert_eq!(context_summary_request(""), None);
    }

    #[test]
    fn request_prefixes_instruction() {
        let request = lab_request(&summarizer(), " notes ").unwrap();
        assert!(request.starts_with("You are an elite chief of staff."));
        assert!(request.ends_with("\n\nnotes"));
    }

    #[test]
    fn answers_are_sanitized_html() {
        let output = LabOutput::answer("**done** <script>x</script>");
        let LabOutput::Answer { html } = output else {
            panic!("expected answer");
        };
        assert!(html.contains("<strong>done</strong>"));
        assert!(!html.contains("script"));
    }
}
