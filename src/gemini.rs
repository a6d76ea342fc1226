//! Gemini completion client.
//!
//! One [`ChatSession`] wraps one multi-turn exchange with the
//! `generateContent` endpoint. The session is created with a fixed system
//! instruction and a structured-output schema so the model replies with JSON
//! shaped like an [`ActionDescriptor`]; [`ChatSession::send`] does the single
//! leniency step of stripping a markdown fence before parsing.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::action::{response_schema, ActionDescriptor, SYSTEM_INSTRUCTION};
use crate::lang::Language;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ChatError {
    /// The session could not be configured at all (missing credential,
    /// unbuildable client). Fatal for the assistant feature; not retried.
    #[error("could not initialize the AI session: {0}")]
    SessionInit(String),

    /// The request to the service failed outright (network, timeout, HTTP
    /// error status). The conversation stays usable for the next turn.
    #[error("request to the AI service failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A reply arrived but was not a conforming action descriptor.
    #[error("AI reply was not a usable action: {0}")]
    ResponseParse(String),
}

#[derive(Debug, Clone, Serialize)]
struct GenerateRequest<'a> {
    contents: &'a [Content],
    #[serde(rename = "systemInstruction")]
    system_instruction: &'a Content,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

impl Content {
    fn system(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![Part { text: text.to_string() }],
        }
    }

    fn user(text: &str) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part { text: text.to_string() }],
        }
    }

    fn model(text: &str) -> Self {
        Self {
            role: Some("model".to_string()),
            parts: vec![Part { text: text.to_string() }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str) -> Result<Self, ChatError> {
        if api_key.is_empty() {
            return Err(ChatError::SessionInit("API key is empty".to_string()));
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ChatError::SessionInit(e.to_string()))?;

        Ok(Self {
            http,
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    /// Reads the credential from `GEMINI_API_KEY`. Absence is fatal for the
    /// whole assistant feature, not just one request.
    pub fn from_env(model: Option<String>) -> Result<Self, ChatError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ChatError::SessionInit("GEMINI_API_KEY environment variable not set".to_string()))?;
        Self::new(&api_key, model.as_deref().unwrap_or(DEFAULT_MODEL))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Configures a fresh session. No network traffic happens here; the
    /// first `send` surfaces transport problems.
    pub fn create_session(&self, language: Language) -> ChatSession {
        let instruction = format!(
            "{}\nThe user's interface language is {}. Prefer it when their language is ambiguous.",
            SYSTEM_INSTRUCTION,
            language.display_name()
        );
        ChatSession {
            client: self.clone(),
            system_instruction: Content::system(&instruction),
            contents: Vec::new(),
        }
    }
}

/// One ongoing exchange with the model. Turn history advances even when a
/// reply fails to parse; the raw exchange already happened.
pub struct ChatSession {
    client: GeminiClient,
    system_instruction: Content,
    contents: Vec<Content>,
}

impl ChatSession {
    /// Submits `text` as the next user turn and parses the reply into an
    /// [`ActionDescriptor`].
    pub async fn send(&mut self, text: &str) -> Result<ActionDescriptor, ChatError> {
        self.contents.push(Content::user(text));

        let request = GenerateRequest {
            contents: &self.contents,
            system_instruction: &self.system_instruction,
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            BASE_URL, self.client.model, self.client.api_key
        );
        debug!(model = %self.client.model, turns = self.contents.len(), "sending chat turn");

        let response = self.client.http.post(&url).json(&request).send().await?;

        if let Err(err) = response.error_for_status_ref() {
            let body = response.text().await.unwrap_or_default();
            error!(%err, body, "gemini request failed");
            return Err(ChatError::Transport(err));
        }

        let reply: GenerateResponse = response.json().await?;
        let raw = reply
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| ChatError::ResponseParse("reply contained no text".to_string()))?;

        // Record the model turn before parsing so history stays consistent
        // even when the reply turns out to be garbage.
        self.contents.push(Content::model(&raw));

        parse_reply(&raw)
    }

    pub fn turn_count(&self) -> usize {
        self.contents.len()
    }
}

/// Strips fence markup and parses the reply, rejecting JSON that lacks the
/// mandatory `action`/`responseText` fields.
fn parse_reply(raw: &str) -> Result<ActionDescriptor, ChatError> {
    let cleaned = strip_code_fence(raw);
    serde_json::from_str(cleaned).map_err(|err| {
        warn!(%err, raw, "model reply did not conform to the action schema");
        ChatError::ResponseParse(err.to_string())
    })
}

/// Some replies arrive wrapped in ```json fences despite the schema
/// constraint; peel one layer off before parsing.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::UiAction;
    use crate::state::Tab;

    #[test]
    fn test_client_rejects_empty_api_key() {
        let client = GeminiClient::new("", DEFAULT_MODEL);
        assert!(matches!(client.err(), Some(ChatError::SessionInit(_))));
    }

    #[test]
    fn test_session_starts_with_empty_history() {
        let client = GeminiClient::new("test-key", DEFAULT_MODEL).unwrap();
        let session = client.create_session(Language::English);
        assert_eq!(session.turn_count(), 0);
    }

    #[test]
    fn test_strip_code_fence_variants() {
        let body = r#"{"action":"text_only","responseText":"hi"}"#;
        assert_eq!(strip_code_fence(body), body);
        assert_eq!(strip_code_fence(&format!("```json\n{}\n```", body)), body);
        assert_eq!(strip_code_fence(&format!("```\n{}\n```", body)), body);
        assert_eq!(strip_code_fence(&format!("  {}  ", body)), body);
    }

    #[test]
    fn test_parse_reply_with_fence() {
        let raw = "```json\n{\"action\":\"navigate\",\"tab\":\"analytics\",\"responseText\":\"Sure.\"}\n```";
        let descriptor = parse_reply(raw).unwrap();
        assert_eq!(descriptor.action, UiAction::Navigate);
        assert_eq!(descriptor.tab, Some(Tab::Analytics));
    }

    #[test]
    fn test_parse_reply_rejects_prose() {
        let err = parse_reply("The groundwater in Kerala is doing fine.").unwrap_err();
        assert!(matches!(err, ChatError::ResponseParse(_)));
    }

    #[test]
    fn test_parse_reply_rejects_missing_response_text() {
        let err = parse_reply(r#"{"action":"navigate","tab":"map"}"#).unwrap_err();
        assert!(matches!(err, ChatError::ResponseParse(_)));
    }

    #[test]
    fn test_request_serializes_wire_names() {
        let system_instruction = Content::system("be helpful");
        let contents = vec![Content::user("hello")];
        let request = GenerateRequest {
            contents: &contents,
            system_instruction: &system_instruction,
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("systemInstruction").is_some());
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["contents"][0]["role"], "user");
        // The system turn carries no role on the wire.
        assert!(value["systemInstruction"].get("role").is_none());
    }
}
