use std::env;
use std::sync::OnceLock;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AiError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: None,
            model: DEFAULT_MODEL.into(),
        }
    }
}

impl AiConfig {
    /// Read `VANGUARD_AI_API_KEY`, `VANGUARD_AI_BASE_URL` and `VANGUARD_AI_MODEL`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as `from_env` with an injectable variable source.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = lookup("VANGUARD_AI_API_KEY").filter(|key| !key.trim().is_empty());
        let base_url = lookup("VANGUARD_AI_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let model = lookup("VANGUARD_AI_MODEL")
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.into());
        Self {
            base_url,
            api_key,
            model,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }
}

/// Authenticated client for an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct AiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl AiClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate text from a single prompt.
    ///
    /// # Errors
    ///
    /// Returns `AiError` when the request fails or the response is empty.
    pub async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        self.chat(&[ChatMessage::user(prompt)]).await
    }

    /// Send a full message list and return the first choice's text.
    ///
    /// # Errors
    ///
    /// Returns `AiError` when the request fails or the response is empty.
    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<String, AiError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let payload = ChatRequest {
            model: &self.model,
            messages,
            temperature: 0.7,
        };

        debug!(model = %self.model, messages = messages.len(), "sending chat request");
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AiError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(AiError::EmptyResponse)?;

        Ok(content.trim().to_string())
    }
}

/// Builds the authenticated client on first use and caches it.
pub struct AiClientFactory {
    config: AiConfig,
    client: OnceLock<AiClient>,
}

impl AiClientFactory {
    #[must_use]
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            client: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// The shared client.
    ///
    /// # Errors
    ///
    /// Returns `AiError::MissingCredential` when no API key is configured.
    pub fn client(&self) -> Result<&AiClient, AiError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AiError::MissingCredential)?;
        Ok(self.client.get_or_init(|| {
            AiClient::new(&self.config.base_url, api_key, &self.config.model)
        }))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_without_env() {
        let config = AiConfig::from_lookup(|_| None);
        assert_eq!(config, AiConfig::default());
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = AiConfig::from_lookup(|name| match name {
            "VANGUARD_AI_API_KEY" => Some("   ".into()),
            "VANGUARD_AI_MODEL" => Some("local-model".into()),
            _ => None,
        });
        assert_eq!(config.api_key, None);
        assert_eq!(config.model, "local-model");
    }

    #[test]
    fn factory_without_key_reports_missing_credential() {
        let factory = AiClientFactory::new(AiConfig::default());
        assert!(!factory.is_configured());
        assert!(matches!(factory.client(), Err(AiError::MissingCredential)));
    }

    #[test]
    fn factory_caches_one_client() {
        let factory = AiClientFactory::new(AiConfig {
            api_key: Some("sk-test".into()),
            ..AiConfig::default()
        });
        let first = factory.client().unwrap() as *const AiClient;
        let second = factory.client().unwrap() as *const AiClient;
        assert_eq!(first, second);
        assert_eq!(factory.client().unwrap().model(), DEFAULT_MODEL);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_string(&ChatMessage::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }
}
