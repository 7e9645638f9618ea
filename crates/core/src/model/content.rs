use crate::model::ids::InteractiveId;
use crate::model::widget::WidgetKind;

/// Language tag for code listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeLanguage {
    Python,
    Solidity,
    Bash,
    JavaScript,
}

impl CodeLanguage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Solidity => "solidity",
            Self::Bash => "bash",
            Self::JavaScript => "javascript",
        }
    }
}

/// One renderable block of lesson content.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
    Paragraph(String),
    Heading(String),
    List(Vec<String>),
    Code {
        language: CodeLanguage,
        source: String,
        output: Option<String>,
    },
    Terminal(String),
    Quote(String),
    Image {
        src: String,
        alt: String,
    },
    Interactive {
        component: WidgetKind,
        interactive_id: InteractiveId,
    },
}

impl ContentItem {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph(text.into())
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Self::Heading(text.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    pub fn quote(text: impl Into<String>) -> Self {
        Self::Quote(text.into())
    }

    /// An interactive block; the component name is resolved through the widget registry.
    pub fn interactive(component: &str, interactive_id: impl Into<InteractiveId>) -> Self {
        Self::Interactive {
            component: WidgetKind::from_component_name(component),
            interactive_id: interactive_id.into(),
        }
    }

    /// Plain text used for AI context, or `None` for blocks with no prose.
    #[must_use]
    pub fn plain_text(&self) -> Option<String> {
        match self {
            Self::Paragraph(text) | Self::Heading(text) | Self::Quote(text) | Self::Terminal(text) => {
                Some(text.clone())
            }
            Self::List(items) => Some(items.join("\n- ")),
            Self::Code { source, .. } => Some(source.clone()),
            Self::Image { alt, .. } => Some(alt.clone()),
            Self::Interactive { .. } => None,
        }
    }

    #[must_use]
    pub fn interactive_id(&self) -> Option<&InteractiveId> {
        match self {
            Self::Interactive { interactive_id, .. } => Some(interactive_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_plain_text_joins_items_as_bullets() {
        let item = ContentItem::list(["a", "b", "c"]);
        assert_eq!(item.plain_text().as_deref(), Some("a\n- b\n- c"));
    }

    #[test]
    fn interactive_has_no_prose_but_exposes_id() {
        let item = ContentItem::interactive("ModelExplorer", "model-explorer-1");
        assert_eq!(item.plain_text(), None);
        assert_eq!(
            item.interactive_id().map(InteractiveId::as_str),
            Some("model-explorer-1")
        );
    }
}
