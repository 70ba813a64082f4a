// 🔧 Configuration - Everything the dispatcher needs, passed in explicitly
// Invoice collection, optional inference client, optional fixed reference date

use crate::inference::{InferenceClient, OpenAiClient, DEFAULT_MODEL};
use crate::invoice::InvoiceCollection;
use chrono::{Local, NaiveDate};
use std::env;
use tracing::info;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const MODEL_VAR: &str = "OPENAI_MODEL";

pub struct ChatConfig {
    pub invoices: InvoiceCollection,

    /// Present only when an inference credential is configured
    pub inference: Option<Box<dyn InferenceClient>>,

    /// Fixed "today" for due-date windows; `None` reads the local clock per query
    pub reference_date: Option<NaiveDate>,
}

impl ChatConfig {
    /// Rules only, local clock.
    pub fn new(invoices: InvoiceCollection) -> Self {
        ChatConfig {
            invoices,
            inference: None,
            reference_date: None,
        }
    }

    /// Attach an OpenAI client when `OPENAI_API_KEY` is set and non-empty.
    /// The model is `model_override`, else `OPENAI_MODEL`, else the default.
    pub fn from_env(invoices: InvoiceCollection, model_override: Option<&str>) -> Self {
        Self::from_vars(invoices, model_override, |name| env::var(name).ok())
    }

    /// `from_env` over an arbitrary variable lookup
    pub fn from_vars<F>(invoices: InvoiceCollection, model_override: Option<&str>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let model = model_override
            .map(str::to_string)
            .or_else(|| lookup(MODEL_VAR).filter(|m| !m.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Self::new(invoices).with_api_key(lookup(API_KEY_VAR), &model)
    }

    /// Attach an OpenAI client for `api_key` if it is present and non-empty.
    pub fn with_api_key(self, api_key: Option<String>, model: &str) -> Self {
        match api_key.filter(|k| !k.trim().is_empty()) {
            Some(key) => {
                info!(model, "inference credential found, LLM answers enabled");
                self.with_inference(Box::new(OpenAiClient::with_model(key, model)))
            }
            None => {
                info!("no inference credential, answering with rules only");
                self
            }
        }
    }

    pub fn with_inference(mut self, client: Box<dyn InferenceClient>) -> Self {
        self.inference = Some(client);
        self
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn has_inference(&self) -> bool {
        self.inference.is_some()
    }

    /// Reference date for the current query
    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

// ============================================================================
// TESTS
// ============================================================================
