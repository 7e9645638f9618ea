//! Registry mapping a content item's component name to a widget kind.

/// Static description of a prompt-driven AI lab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiLabSpec {
    pub component: &'static str,
    pub title: &'static str,
    pub blurb: &'static str,
    pub placeholder: &'static str,
    pub instruction: &'static str,
}

const AI_LABS: &[AiLabSpec] = &[
    AiLabSpec {
        component: "MeetingSummarizer",
        title: "Chaos-to-Order Engine",
        blurb: "Paste messy notes. Get a crisp team email.",
        placeholder: "Standup notes: API launch slipped to Friday, Sam owns docs...",
        instruction: "You are an elite chief of staff. Turn these meeting notes into a \
                      professional email with a subject line, key wins, action items and updates.",
    },
    AiLabSpec {
        component: "PromptMutationStudio",
        title: "Prompt Mutation Studio",
        blurb: "Mutate a prompt into three stylistic variants.",
        placeholder: "A lighthouse at dusk",
        instruction: "Rewrite the prompt below into three distinct variants: cinematic, \
                      minimalist and surreal. Return them as a markdown list.",
    },
    AiLabSpec {
        component: "EthicalDilemmaSimulator",
        title: "Ethical Dilemma Simulator",
        blurb: "Describe a choice and hear how three ethical lenses judge it.",
        placeholder: "The car swerves to protect its passenger.",
        instruction: "Explain how utilitarian, deontological and virtue ethics would each \
                      justify or condemn this choice. Keep each lens to two sentences.",
    },
    AiLabSpec {
        component: "ExplainabilityPanel",
        title: "Explainability Panel",
        blurb: "Ask which words in a prompt drive the model's attention.",
        placeholder: "a happy dog in a park",
        instruction: "List the words of this prompt ordered by how strongly they would steer \
                      an image model, with a one-line reason each.",
    },
    AiLabSpec {
        component: "EthicalBiasMirror",
        title: "Ethical Bias Mirror",
        blurb: "Compare how a prompt lands across languages.",
        placeholder: "Describe a successful engineer.",
        instruction: "Answer this prompt as it might be answered in English, Spanish and \
                      Japanese cultural contexts, then point out any bias or drift.",
    },
    AiLabSpec {
        component: "PromptArchitectWorkbench",
        title: "Prompt Architect Workbench",
        blurb: "Design a structured prompt and get an annotated critique.",
        placeholder: "Role: museum guide. Tone: playful. Task: explain diffusion models.",
        instruction: "Critique this prompt design. Explain how role, tone and constraints \
                      change the output and propose an improved version.",
    },
    AiLabSpec {
        component: "InteractiveDebates",
        title: "Interactive Debates",
        blurb: "Take a position on AI authorship and face a Socratic reply.",
        placeholder: "AI-generated art should be copyrightable.",
        instruction: "Respond as a Socratic tutor. Ask two probing questions and give the \
                      strongest counter-argument to this position.",
    },
    AiLabSpec {
        component: "ApiKeyChatSimulator",
        title: "API Key Chat",
        blurb: "Send a message through the configured API key.",
        placeholder: "What does an API key protect?",
        instruction: "Answer briefly and clearly for a beginner.",
    },
];

/// Kind of widget to mount for an interactive content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetKind {
    /// Slider-driven linear model (`SimplePredictiveModel`).
    PredictionSlider,
    /// Context-size slider with a debounced AI summary (`ContextWindowExplorer`).
    ContextWindowLab,
    /// Free-text prompt lab backed by the AI client.
    AiLab(AiLabSpec),
    /// Unrecognized or not-yet-ported component; rendered as a placeholder.
    Unknown(String),
}

impl WidgetKind {
    /// Resolve a component name. Never fails: unknown names map to `Unknown`.
    #[must_use]
    pub fn from_component_name(name: &str) -> Self {
        match name {
            "SimplePredictiveModel" => Self::PredictionSlider,
            "ContextWindowExplorer" => Self::ContextWindowLab,
            other => AI_LABS
                .iter()
                .find(|spec| spec.component == other)
                .map_or_else(|| Self::Unknown(other.to_owned()), |spec| Self::AiLab(*spec)),
        }
    }

    #[must_use]
    pub fn component_name(&self) -> &str {
        match self {
            Self::PredictionSlider => "SimplePredictiveModel",
            Self::ContextWindowLab => "ContextWindowExplorer",
            Self::AiLab(spec) => spec.component,
            Self::Unknown(name) => name,
        }
    }

    #[must_use]
    pub fn uses_ai(&self) -> bool {
        matches!(self, Self::ContextWindowLab | Self::AiLab(_))
    }
}

/// Linear "hours studied" model: `min(100, round(8h + 15))`.
#[must_use]
pub fn predict_score(hours: f64) -> u32 {
    let raw = (8.0 * hours.max(0.0) + 15.0).round();
    // clamped to [15, 100] before the cast
    raw.min(100.0) as u32
}

/// Keeps the leading `percent`% of words of `text` (clamped to 10..=100).
#[must_use]
pub fn visible_context(text: &str, percent: u8) -> String {
    let percent = usize::from(percent.clamp(10, 100));
    let words: Vec<&str> = text.split_whitespace().collect();
    let keep = (words.len() * percent).div_ceil(100);
    words[..keep].join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_resolve() {
        assert_eq!(
            WidgetKind::from_component_name("SimplePredictiveModel"),
            WidgetKind::PredictionSlider
        );
        let kind = WidgetKind::from_component_name("MeetingSummarizer");
        assert!(matches!(kind, WidgetKind::AiLab(spec) if spec.title == "Chaos-to-Order Engine"));
    }

    #[test]
    fn unknown_names_fall_back_to_placeholder() {
        let kind = WidgetKind::from_component_name("HologramComposer");
        assert_eq!(kind, WidgetKind::Unknown("HologramComposer".into()));
        assert_eq!(kind.component_name(), "HologramComposer");
        assert!(!kind.uses_ai());
    }

    #[test]
    fn predicted_score_follows_linear_model_and_clamps() {
        assert_eq!(predict_score(0.0), 15);
        assert_eq!(predict_score(5.0), 55);
        assert_eq!(predict_score(2.5), 35);
        assert_eq!(predict_score(10.0), 95);
        assert_eq!(predict_score(12.0), 100);
    }

    #[test]
    fn visible_context_keeps_leading_share() {
        let text = "one two three four five six seven eight nine ten";
        assert_eq!(visible_context(text, 30), "one two three");
        assert_eq!(visible_context(text, 100), text);
        assert_eq!(visible_context(text, 0), "one");
        assert_eq!(visible_context("", 50), "");
    }
}
