// 🏷️ Intent Matcher - Rules as Data
// Ordered pattern rules that turn a free-text question into an Intent.
// The first rule whose trigger and extractor both succeed wins, and its
// handler produces the answer.

use crate::aggregator::Aggregator;
use crate::formatter;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

// Digit classes are ASCII-only so every capture is something `str::parse` accepts
static DUE_DAYS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"next\s+([0-9]+)\s+days").expect("Invalid regex"));

static VENDOR_TOTAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"total value of the invoice from\s+([a-zA-Z0-9 ]+)").expect("Invalid regex")
});

static ABOVE_AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"invoices\s*>\s*\$?([0-9,]+(?:\.[0-9]+)?)").expect("Invalid regex")
});

// ============================================================================
// INTENT
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// "How many invoices are due in the next N days?"
    /// Counts too large for `u64` saturate.
    DueWithinDays { days: u64 },

    /// "What is the total value of the invoice from X?"
    /// `vendor` is the trimmed capture from the lower-cased query.
    VendorTotal { vendor: String },

    /// "List all vendors with invoices > $X"
    VendorsAboveAmount { amount: f64 },

    ListVendors,

    /// Intent contributed by a rule registered at runtime
    Custom { name: &'static str, args: Vec<String> },

    /// Nothing matched; answered with the help text
    Fallback,
}

/// Produces the answer text for an intent extracted by the same rule.
pub type IntentHandler = fn(&Intent, &Aggregator<'_>, NaiveDate) -> String;

// ============================================================================
// RULE DEFINITION
// ============================================================================

/// One entry of the ordered rule table.
pub struct IntentRule {
    /// Rule ID for tracking
    pub id: &'static str,

    /// Cheap keyword check on the normalized query
    pub trigger: fn(&str) -> bool,

    /// Pulls parameters out of the normalized query; `None` means no match
    pub extract: fn(&str) -> Option<Intent>,

    pub handle: IntentHandler,
}

impl IntentRule {
    pub fn apply(&self, normalized: &str) -> Option<Intent> {
        if (self.trigger)(normalized) {
            (self.extract)(normalized)
        } else {
            None
        }
    }
}

/// Default rule table, in priority order.
pub fn default_rules() -> Vec<IntentRule> {
    vec![
        IntentRule {
            id: "due_within_days",
            trigger: |q| q.contains("how many invoices are due"),
            extract: |q| {
                let caps = DUE_DAYS_RE.captures(q)?;
                // Only ASCII digits reach here, so parsing fails on overflow alone
                let days = caps[1].parse::<u64>().unwrap_or(u64::MAX);
                Some(Intent::DueWithinDays { days })
            },
            handle: answer_due_within_days,
        },
        IntentRule {
            id: "vendor_total",
            trigger: |_| true,
            extract: |q| {
                let caps = VENDOR_TOTAL_RE.captures(q)?;
                Some(Intent::VendorTotal {
                    vendor: caps[1].trim().to_string(),
                })
            },
            handle: answer_vendor_total,
        },
        IntentRule {
            id: "vendors_above_amount",
            trigger: |q| q.contains("vendors"),
            extract: |q| {
                let caps = ABOVE_AMOUNT_RE.captures(q)?;
                let amount = caps[1].replace(',', "").parse::<f64>().ok()?;
                Some(Intent::VendorsAboveAmount { amount })
            },
            handle: answer_vendors_above,
        },
        IntentRule {
            id: "list_vendors",
            trigger: |q| q.contains("list") && q.contains("vendors"),
            extract: |_| Some(Intent::ListVendors),
            handle: |_, agg, _| formatter::format_list_vendors(&agg.list_all()),
        },
    ]
}

/// Catch-all evaluated after every other rule.
pub fn fallback_rule() -> IntentRule {
    IntentRule {
        id: "fallback",
        trigger: |_| true,
        extract: |_| Some(Intent::Fallback),
        handle: |_, _, _| formatter::HELP_TEXT.to_string(),
    }
}

// ============================================================================
// DEFAULT HANDLERS
// ============================================================================

fn answer_due_within_days(intent: &Intent, agg: &Aggregator<'_>, today: NaiveDate) -> String {
    let Intent::DueWithinDays { days } = intent else {
        return formatter::HELP_TEXT.to_string();
    };
    formatter::format_due_within_days(*days, &agg.due_within_days(today, *days))
}

fn answer_vendor_total(intent: &Intent, agg: &Aggregator<'_>, _today: NaiveDate) -> String {
    let Intent::VendorTotal { vendor } = intent else {
        return formatter::HELP_TEXT.to_string();
    };
    formatter::format_vendor_total(vendor, &agg.vendor_total(vendor))
}

fn answer_vendors_above(intent: &Intent, agg: &Aggregator<'_>, _today: NaiveDate) -> String {
    let Intent::VendorsAboveAmount { amount } = intent else {
        return formatter::HELP_TEXT.to_string();
    };
    formatter::format_vendors_above(*amount, &agg.vendors_above(*amount))
}

// ============================================================================
// MATCHER
// ============================================================================

/// The winning rule together with the intent it extracted.
pub struct Classification<'a> {
    pub rule: &'a IntentRule,
    pub intent: Intent,
}

impl Classification<'_> {
    pub fn answer(&self, agg: &Aggregator<'_>, today: NaiveDate) -> String {
        (self.rule.handle)(&self.intent, agg, today)
    }
}

pub struct IntentMatcher {
    rules: Vec<IntentRule>,
    fallback: IntentRule,
}

impl IntentMatcher {
    pub fn new() -> Self {
        IntentMatcher::from_rules(default_rules())
    }

    /// Declaration order is priority order.
    pub fn from_rules(rules: Vec<IntentRule>) -> Self {
        IntentMatcher {
            rules,
            fallback: fallback_rule(),
        }
    }

    /// Append a rule after the existing ones (still ahead of the fallback)
    pub fn add_rule(&mut self, rule: IntentRule) {
        self.rules.push(rule);
    }

    /// ASCII lower-casing only
    pub fn normalize(query: &str) -> String {
        query.to_ascii_lowercase()
    }

    /// Classify a query. Never fails: unmatched input resolves to the fallback rule.
    pub fn classify(&self, query: &str) -> Classification<'_> {
        let normalized = Self::normalize(query);

        for rule in &self.rules {
            if let Some(intent) = rule.apply(&normalized) {
                debug!(rule = rule.id, ?intent, "intent matched");
                return Classification { rule, intent };
            }
        }

        debug!("no rule matched, using fallback");
        Classification {
            rule: &self.fallback,
            intent: Intent::Fallback,
        }
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Default for IntentMatcher {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
