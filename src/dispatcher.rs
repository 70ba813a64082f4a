// 🔀 Dispatcher - LLM first when configured, rules otherwise
// Tags every answer with where it came from

use crate::config::ChatConfig;
use crate::inference::InferenceOutcome;
use crate::rules::RuleEngine;
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Llm,
    Rules,
}

impl Origin {
    pub fn tag(&self) -> &'static str {
        match self {
            Origin::Llm => " [via LLM]",
            Origin::Rules => " [via rules]",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub text: String,
    pub origin: Origin,
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.text, self.origin.tag())
    }
}

pub struct Dispatcher {
    config: ChatConfig,
    engine: RuleEngine,
}

impl Dispatcher {
    pub fn new(config: ChatConfig) -> Self {
        Self::with_engine(config, RuleEngine::new())
    }

    pub fn with_engine(config: ChatConfig, engine: RuleEngine) -> Self {
        Dispatcher { config, engine }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Answer one query. Inference failures only trigger the rule fallback.
    pub fn respond(&self, query: &str) -> Response {
        if let Some(client) = &self.config.inference {
            match client.answer(query, &self.config.invoices) {
                outcome @ InferenceOutcome::Answer(_) => {
                    if let Some(text) = outcome.usable_answer() {
                        debug!(client = client.name(), "answered by inference");
                        return Response {
                            text: text.to_string(),
                            origin: Origin::Llm,
                        };
                    }
                    debug!(client = client.name(), "empty inference answer, using rules");
                }
                InferenceOutcome::Failed(reason) => {
                    warn!(client = client.name(), %reason, "inference failed, using rules");
                }
            }
        }

        let text = self
            .engine
            .answer(query, &self.config.invoices, self.config.today());
        Response {
            text,
            origin: Origin::Rules,
        }
    }

    /// Answer text with its origin tag appended
    pub fn answer(&self, query: &str) -> String {
        self.respond(query).to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================
