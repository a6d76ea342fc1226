//! Conversation controller: owns the visible transcript and the
//! request/response cycle with the completion client.
//!
//! At most one request is in flight at a time; a submit while one is
//! outstanding is dropped, not queued, so assistant replies can never
//! reorder relative to the user message that triggered them.

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::action::ActionDescriptor;
use crate::gemini::{ChatError, ChatSession, GeminiClient};
use crate::lang::Language;
use crate::state::{ChatMessage, ChatRole};

const INIT_ERROR_TEXT: &str =
    "Sorry, I couldn't connect to the AI service. Please check your API key and restart.";
const UNAVAILABLE_TEXT: &str = "Cannot send message. The AI service is not available.";
const REPLY_ERROR_TEXT: &str =
    "I'm sorry, I encountered an error. Could you please rephrase your request?";

type SendOutcome = (ChatSession, Result<ActionDescriptor, ChatError>);

pub struct ChatController {
    client: Option<GeminiClient>,
    session: Option<ChatSession>,
    messages: Vec<ChatMessage>,
    task: Option<JoinHandle<SendOutcome>>,
    language: Language,
    last_initial_prompt: Option<String>,
    next_message_id: u64,
}

impl ChatController {
    /// `client` is `None` when session setup already failed (missing
    /// credential); the controller then runs in a degraded, message-only
    /// mode instead of crashing the dashboard.
    pub fn new(client: Option<GeminiClient>, language: Language) -> Self {
        Self {
            client,
            session: None,
            messages: Vec::new(),
            task: None,
            language,
            last_initial_prompt: None,
            next_message_id: 1,
        }
    }

    /// Begins a fresh conversation in `language`, discarding the previous
    /// transcript and session. A reply still in flight is detached and its
    /// resolution never rendered.
    pub fn start(&mut self, language: Language) {
        self.language = language;
        self.messages.clear();
        self.task = None;

        match &self.client {
            Some(client) => {
                self.session = Some(client.create_session(language));
                let greeting = language.greeting().to_string();
                self.push(ChatRole::Assistant, greeting);
            }
            None => {
                self.session = None;
                self.push(ChatRole::Assistant, INIT_ERROR_TEXT.to_string());
            }
        }
    }

    /// Submits a user message. No-op for blank input or while a request is
    /// already in flight.
    pub fn submit(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() || self.task.is_some() {
            return;
        }

        self.push(ChatRole::User, text.to_string());

        let Some(mut session) = self.session.take() else {
            self.push(ChatRole::Assistant, UNAVAILABLE_TEXT.to_string());
            return;
        };

        let text = text.to_string();
        self.task = Some(tokio::spawn(async move {
            let outcome = session.send(&text).await;
            (session, outcome)
        }));
    }

    /// Submits an externally supplied prompt (e.g. from the command line)
    /// exactly once per distinct value, so re-renders don't duplicate it.
    pub fn submit_initial(&mut self, prompt: &str) {
        if self.last_initial_prompt.as_deref() == Some(prompt) {
            return;
        }
        self.last_initial_prompt = Some(prompt.to_string());
        self.submit(prompt);
    }

    /// Collects the outcome of a finished request, if any. Appends the
    /// assistant (or apology) message and hands the descriptor up for
    /// dispatch. Always leaves the controller idle again.
    pub async fn poll(&mut self) -> Option<ActionDescriptor> {
        if !self.task.as_ref().is_some_and(|t| t.is_finished()) {
            return None;
        }
        let task = self.task.take()?;

        match task.await {
            Ok((session, outcome)) => {
                self.session = Some(session);
                match outcome {
                    Ok(descriptor) => {
                        info!(action = ?descriptor.action, "assistant turn completed");
                        self.push(ChatRole::Assistant, descriptor.response_text.clone());
                        Some(descriptor)
                    }
                    Err(err) => {
                        warn!(%err, "assistant turn failed");
                        self.push(ChatRole::Assistant, REPLY_ERROR_TEXT.to_string());
                        None
                    }
                }
            }
            Err(err) => {
                warn!(%err, "assistant task aborted");
                self.push(ChatRole::Assistant, REPLY_ERROR_TEXT.to_string());
                None
            }
        }
    }

    pub fn is_sending(&self) -> bool {
        self.task.is_some()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn push(&mut self, role: ChatRole, text: String) {
        let id = self.next_message_id;
        self.next_message_id += 1;
        self.messages.push(ChatMessage { id, role, text });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::DEFAULT_MODEL;
    use std::time::Duration;

    fn degraded() -> ChatController {
        let mut controller = ChatController::new(None, Language::English);
        controller.start(Language::English);
        controller
    }

    fn connected() -> ChatController {
        let client = GeminiClient::new("test-key", DEFAULT_MODEL).unwrap();
        let mut controller = ChatController::new(Some(client), Language::English);
        controller.start(Language::English);
        controller
    }

    #[tokio::test]
    async fn test_start_greets_in_language() {
        let client = GeminiClient::new("test-key", DEFAULT_MODEL).unwrap();
        let mut controller = ChatController::new(Some(client), Language::Hindi);
        controller.start(Language::Hindi);

        assert_eq!(controller.messages().len(), 1);
        assert_eq!(controller.messages()[0].role, ChatRole::Assistant);
        assert_eq!(controller.messages()[0].text, Language::Hindi.greeting());
    }

    #[tokio::test]
    async fn test_degraded_start_shows_error_instead_of_greeting() {
        let controller = degraded();
        assert_eq!(controller.messages().len(), 1);
        assert_eq!(controller.messages()[0].text, INIT_ERROR_TEXT);
    }

    #[tokio::test]
    async fn test_blank_submit_is_noop() {
        let mut controller = connected();
        controller.submit("");
        controller.submit("   \t  ");

        assert_eq!(controller.messages().len(), 1);
        assert!(!controller.is_sending());
    }

    #[tokio::test]
    async fn test_submit_while_sending_is_dropped() {
        let mut controller = connected();
        let session = GeminiClient::new("test-key", DEFAULT_MODEL)
            .unwrap()
            .create_session(Language::English);
        controller.task = Some(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            (session, Err(ChatError::ResponseParse("unreachable".to_string())))
        }));

        let before = controller.messages().len();
        controller.submit("second message while busy");

        assert_eq!(controller.messages().len(), before);
        assert!(controller.is_sending());
    }

    #[tokio::test]
    async fn test_degraded_submit_appends_user_and_error() {
        let mut controller = degraded();
        controller.submit("hello?");

        let messages = controller.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, ChatRole::User);
        assert_eq!(messages[1].text, "hello?");
        assert_eq!(messages[2].text, UNAVAILABLE_TEXT);
        assert!(messages[1].id < messages[2].id);
        assert!(!controller.is_sending());
    }

    #[tokio::test]
    async fn test_initial_prompt_submitted_once_per_value() {
        let mut controller = degraded();
        controller.submit_initial("show me the map");
        let after_first = controller.messages().len();
        controller.submit_initial("show me the map");

        assert_eq!(controller.messages().len(), after_first);

        controller.submit_initial("a different prompt");
        assert!(controller.messages().len() > after_first);
    }

    #[tokio::test]
    async fn test_poll_success_appends_reply_and_returns_descriptor() {
        let mut controller = connected();
        let session = GeminiClient::new("test-key", DEFAULT_MODEL)
            .unwrap()
            .create_session(Language::English);
        let descriptor = ActionDescriptor::text_only("All quiet on the aquifer.");
        controller.task = Some(tokio::spawn(async move { (session, Ok(descriptor)) }));

        tokio::time::sleep(Duration::from_millis(20)).await;
        let result = controller.poll().await;

        assert!(result.is_some());
        assert!(!controller.is_sending());
        let last = controller.messages().last().unwrap();
        assert_eq!(last.role, ChatRole::Assistant);
        assert_eq!(last.text, "All quiet on the aquifer.");
    }

    #[tokio::test]
    async fn test_poll_failure_appends_apology_and_no_action() {
        let mut controller = connected();
        let session = GeminiClient::new("test-key", DEFAULT_MODEL)
            .unwrap()
            .create_session(Language::English);
        controller.task = Some(tokio::spawn(async move {
            (session, Err(ChatError::ResponseParse("not json".to_string())))
        }));

        tokio::time::sleep(Duration::from_millis(20)).await;
        let result = controller.poll().await;

        assert!(result.is_none());
        assert!(!controller.is_sending());
        assert_eq!(controller.messages().last().unwrap().text, REPLY_ERROR_TEXT);
        // The session survives the failed turn.
        assert!(controller.session.is_some());
    }

    #[tokio::test]
    async fn test_poll_without_task_is_none() {
        let mut controller = connected();
        assert!(controller.poll().await.is_none());
    }

    #[tokio::test]
    async fn test_language_change_resets_transcript() {
        let mut controller = degraded();
        controller.submit("some question");
        assert!(controller.messages().len() > 1);

        controller.start(Language::Tamil);
        assert_eq!(controller.messages().len(), 1);
        assert_eq!(controller.language(), Language::Tamil);
    }
}
