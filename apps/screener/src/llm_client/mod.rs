//! LLM client: the single point of entry for all OpenAI API calls in the
//! screener.
//!
//! ARCHITECTURAL RULE: no other module may call the OpenAI API directly.
//! The pipeline depends on the [`Classifier`] trait, not on this client, so
//! tests can substitute a scripted backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// The model used for all classification calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gpt-4o";
/// Reply cap. A well-formed verdict is three short lines; anything past
/// this cap is already off-contract.
const MAX_TOKENS: u32 = 100;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: AssistantMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the assistant text from the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// A classification backend: takes the assembled system prompt and one
/// document's text, returns the raw reply for the verdict parser.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(
        &self,
        system_prompt: &str,
        document_text: &str,
    ) -> Result<String, LlmError>;
}

/// The OpenAI-backed client used by the batch runner.
///
/// One call per document, no retry, no client-side timeout; transport
/// defaults apply. A failed call surfaces immediately and the runner
/// decides what happens to the document.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    /// Makes a raw chat-completions call, returning the full response object.
    pub async fn call(&self, system: &str, user: &str) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }
        if let Some(choice) = chat_response.choices.first() {
            if choice.finish_reason.as_deref() == Some("length") {
                warn!(
                    "classifier reply hit the {}-token cap and may be truncated",
                    MAX_TOKENS
                );
            }
        }

        Ok(chat_response)
    }
}

#[async_trait]
impl Classifier for LlmClient {
    async fn classify(
        &self,
        system_prompt: &str,
        document_text: &str,
    ) -> Result<String, LlmError> {
        let response = self.call(system_prompt, document_text).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response_json() -> &'static str {
        r#"{
            "choices": [
                {
                    "message": {"role": "assistant", "content": "8\nALL_MET\nSolid match"},
                    "finish_reason": "stop"
                }
            ],
            "usage": {"prompt_tokens": 412, "completion_tokens": 14}
        }"#
    }

    #[test]
    fn test_response_text_comes_from_first_choice() {
        let response: ChatResponse = serde_json::from_str(sample_response_json()).unwrap();
        assert_eq!(response.text(), Some("8\nALL_MET\nSolid match"));
    }

    #[test]
    fn test_response_without_choices_has_no_text() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_null_content_has_no_text() {
        let body = r#"{"choices": [{"message": {"content": null}, "finish_reason": "stop"}]}"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_usage_is_optional() {
        let body = r#"{"choices": [{"message": {"content": "hi"}, "finish_reason": null}]}"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(response.usage.is_none());
        assert_eq!(response.text(), Some("hi"));
    }

    #[test]
    fn test_request_sends_system_then_user() {
        let request = ChatRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "judge resumes",
                },
                ChatMessage {
                    role: "user",
                    content: "resume text",
                },
            ],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["max_tokens"], 100);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
    }
}
