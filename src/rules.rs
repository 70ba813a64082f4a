// ⚙️ Rule Engine - Matcher → Aggregator → Formatter
// Deterministic answers for the supported question templates

use crate::aggregator::Aggregator;
use crate::intent::IntentMatcher;
use crate::invoice::InvoiceCollection;
use chrono::NaiveDate;

pub struct RuleEngine {
    matcher: IntentMatcher,
}

impl RuleEngine {
    pub fn new() -> Self {
        RuleEngine {
            matcher: IntentMatcher::new(),
        }
    }

    /// Engine over a custom rule table
    pub fn with_matcher(matcher: IntentMatcher) -> Self {
        RuleEngine { matcher }
    }

    /// Answer a query against `invoices`, with `today` as the reference date
    /// for due-date windows. Always returns text.
    pub fn answer(&self, query: &str, invoices: &InvoiceCollection, today: NaiveDate) -> String {
        let agg = Aggregator::new(invoices);
        self.matcher.classify(query).answer(&agg, today)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::HELP_TEXT;
    use crate::intent::{Intent, IntentRule};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 30).unwrap()
    }

    fn ask(query: &str) -> String {
        RuleEngine::new().answer(query, &InvoiceCollection::sample().unwrap(), today())
    }

    #[test]
    fn test_due_next_7_days() {
        assert_eq!(
            ask("How many invoices are due in the next 7 days?"),
            "1 invoice:\n- Amazon, due 2025-09-05, $2,450.00"
        );
    }

    #[test]
    fn test_due_next_30_days() {
        assert_eq!(
            ask("How many invoices are due in the next 30 days?"),
            "2 invoices:\n- Amazon, due 2025-09-05, $2,450.00\n- Microsoft, due 2025-09-10, $3,100.00"
        );
    }

    #[test]
    fn test_due_none() {
        assert_eq!(
            ask("How many invoices are due in the next 2 days?"),
            "0 invoices due in the next 2 days."
        );
    }

    #[test]
    fn test_vendor_total() {
        assert_eq!(ask("What is the total value of the invoice from Microsoft?"), "$3,100.00");
        assert_eq!(ask("total value of the invoice from AMAZON"), "$2,450.00");
    }

    #[test]
    fn test_vendor_not_found() {
        assert_eq!(
            ask("What is the total value of the invoice from Oracle?"),
            "No invoice found from oracle."
        );
        assert_eq!(
            ask("What is the total value of the invoice from Amaz?"),
            "No invoice found from amaz."
        );
    }

    #[test]
    fn test_vendors_above() {
        assert_eq!(ask("List all vendors with invoices > $2,500."), "Microsoft ($3,100)");
        assert_eq!(
            ask("List all vendors with invoices > $2,000."),
            "Amazon ($2,450), Microsoft ($3,100)"
        );
        assert_eq!(
            ask("vendors with invoices > $3,100"),
            "No vendors with invoices > $3,100.00."
        );
    }

    #[test]
    fn test_list_all_vendors() {
        assert_eq!(ask("List all vendors."), "Amazon ($2,450.00), Microsoft ($3,100.00)");
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(ask("what's the weather today"), HELP_TEXT);
    }

    #[test]
    fn test_due_days_beyond_u32() {
        assert_eq!(
            ask("How many invoices are due in the next 99999999999999999999 days?"),
            "2 invoices:\n- Amazon, due 2025-09-05, $2,450.00\n- Microsoft, due 2025-09-10, $3,100.00"
        );
    }

    #[test]
    fn test_non_ascii_day_count_gets_help() {
        assert_eq!(ask("how many invoices are due in the next \u{0663} days"), HELP_TEXT);
        assert_eq!(
            ask("vendors with invoices > 100.\u{0665}"),
            "Amazon ($2,450), Microsoft ($3,100)"
        );
    }

    #[test]
    fn test_custom_intent_answered_through_engine() {
        let mut matcher = IntentMatcher::new();
        matcher.add_rule(IntentRule {
            id: "largest_invoice",
            trigger: |q| q.contains("largest invoice"),
            extract: |_| Some(Intent::Custom {
                name: "largest_invoice",
                args: Vec::new(),
            }),
            handle: |_, agg, _| {
                agg.list_all()
                    .into_iter()
                    .max_by(|a, b| a.total.total_cmp(&b.total))
                    .map(|inv| format!("{} ({})", inv.vendor, inv.invoice_number))
                    .unwrap_or_default()
            },
        });
        let engine = RuleEngine::with_matcher(matcher);
        let invoices = InvoiceCollection::sample().unwrap();

        assert_eq!(
            engine.answer("Which is the largest invoice?", &invoices, today()),
            "Microsoft (INV-0043)"
        );
        // Built-in rules still win when they match
        assert_eq!(
            engine.answer("List all vendors.", &invoices, today()),
            "Amazon ($2,450.00), Microsoft ($3,100.00)"
        );
    }
}
