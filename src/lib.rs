// Invoice Chatbot - Core Library
// Exposes all modules for use in the CLI and tests

pub mod invoice;     // Invoice records + CSV loader
pub mod aggregator;  // Filters and sums over the collection
pub mod intent;      // Ordered intent rules
pub mod formatter;   // Answer text
pub mod rules;       // Matcher → Aggregator → Formatter
pub mod inference;   // External LLM collaborator
pub mod config;      // Explicit configuration object
pub mod dispatcher;  // LLM-or-rules routing with origin tags

// Re-export commonly used types
pub use invoice::{InvoiceRecord, InvoiceCollection, load_csv};
pub use aggregator::{Aggregator, VendorTotal};
pub use intent::{
    Intent, IntentMatcher, IntentRule, IntentHandler, Classification,
    default_rules, fallback_rule,
};
pub use formatter::{format_currency, HELP_TEXT};
pub use rules::RuleEngine;
pub use inference::{InferenceClient, InferenceOutcome, OpenAiClient};
pub use config::ChatConfig;
pub use dispatcher::{Dispatcher, Origin, Response};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
