// 🤖 Inference Client - External LLM collaborator
// Answers the same questions by delegating to a chat-completions API.
// Every failure is reported as a value, never raised.

use crate::invoice::InvoiceCollection;
use serde::Deserialize;
use tracing::debug;

/// Default OpenAI model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const API_URL: &str = "https://api.openai.com/v1/chat/completions";

const SYSTEM_PROMPT: &str = "You are an assistant that answers invoice-related questions.";

// ============================================================================
// OUTCOME
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum InferenceOutcome {
    /// The service produced an answer (possibly empty)
    Answer(String),

    /// Missing credential, transport error, bad status or malformed body
    Failed(String),
}

impl InferenceOutcome {
    /// The answer text if it is usable (non-empty after trimming)
    pub fn usable_answer(&self) -> Option<&str> {
        match self {
            InferenceOutcome::Answer(text) if !text.trim().is_empty() => Some(text.as_str()),
            _ => None,
        }
    }
}

// ============================================================================
// CLIENT TRAIT
// ============================================================================

pub trait InferenceClient {
    fn answer(&self, query: &str, invoices: &InvoiceCollection) -> InferenceOutcome;

    /// Name for logs
    fn name(&self) -> &str {
        "inference"
    }

    /// Model identifier, when the backend has one
    fn model(&self) -> Option<&str> {
        None
    }
}

/// Build the user message: invoice JSON followed by the question.
pub fn build_user_prompt(query: &str, invoices_json: &str) -> String {
    format!(
        "Here is the parsed invoice data:\n```json\n{}\n```\n\nQuestion: {}\nAnswer concisely.",
        invoices_json, query
    )
}

// ============================================================================
// OPENAI CLIENT
// ============================================================================

pub struct OpenAiClient {
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        OpenAiClient {
            api_key: api_key.into(),
            model: model.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn request_body(&self, user_prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": &self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": user_prompt}
            ],
            "temperature": 0,
            "max_tokens": 200
        })
    }

    fn call_api(&self, query: &str, invoices: &InvoiceCollection) -> anyhow::Result<String> {
        let invoices_json = invoices.to_json()?;
        let body = self.request_body(&build_user_prompt(query, &invoices_json));

        let response = self
            .client
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            anyhow::bail!("OpenAI API error {}: {}", status, text);
        }

        let parsed: ChatResponse = response.json()?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| anyhow::anyhow!("OpenAI returned no choices"))
    }
}

impl InferenceClient for OpenAiClient {
    fn answer(&self, query: &str, invoices: &InvoiceCollection) -> InferenceOutcome {
        if self.api_key.trim().is_empty() {
            return InferenceOutcome::Failed("No API key set.".to_string());
        }

        debug!(model = %self.model, "calling chat completions");
        match self.call_api(query, invoices) {
            Ok(answer) => InferenceOutcome::Answer(answer),
            Err(e) => InferenceOutcome::Failed(format!("{:#}", e)),
        }
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> Option<&str> {
        Some(self.model.as_str())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_answer() {
        assert_eq!(
            InferenceOutcome::Answer("$3,100.00".to_string()).usable_answer(),
            Some("$3,100.00")
        );
        assert_eq!(InferenceOutcome::Answer("   ".to_string()).usable_answer(), None);
        assert_eq!(
            InferenceOutcome::Failed("network down".to_string()).usable_answer(),
            None
        );
    }

    #[test]
    fn test_user_prompt_layout() {
        let json = InvoiceCollection::sample().unwrap().to_json().unwrap();
        let prompt = build_user_prompt("List all vendors.", &json);

        assert!(prompt.starts_with("Here is the parsed invoice data:\n```json\n["));
        assert!(prompt.contains("\"vendor\": \"Amazon\""));
        assert!(prompt.ends_with("```\n\nQuestion: List all vendors.\nAnswer concisely."));
    }

    #[test]
    fn test_request_body() {
        let client = OpenAiClient::with_model("sk-test", "gpt-test");
        let body = client.request_body("hello");

        assert_eq!(body["model"], "gpt-test");
        assert_eq!(body["temperature"], 0);
        assert_eq!(body["max_tokens"], 200);
        assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "hello");
    }

    #[test]
    fn test_empty_key_fails_without_network() {
        let client = OpenAiClient::new("  ");
        let outcome = client.answer("List all vendors.", &InvoiceCollection::sample().unwrap());

        assert_eq!(outcome, InferenceOutcome::Failed("No API key set.".to_string()));
    }

    #[test]
    fn test_default_model() {
        assert_eq!(OpenAiClient::new("sk-test").model(), Some(DEFAULT_MODEL));
    }
}
