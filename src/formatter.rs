// 💬 Formatter - Human-readable answers
// Currency formatting, pluralization and "no result" messages for each intent

use crate::aggregator::VendorTotal;
use crate::invoice::InvoiceRecord;

pub const HELP_TEXT: &str = "Sorry — I couldn't parse that. Try asking:\n\
- How many invoices are due in the next 7 days?\n\
- What is the total value of the invoice from Amazon?\n\
- List all vendors with invoices > $2,000.";

/// Format an amount with thousands separators and a fixed number of decimals.
/// `format_currency(2450.0, 2) == "2,450.00"`
pub fn format_currency(amount: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, amount.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0.00" is not a useful amount
    let negative = amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

pub fn format_due_within_days(days: u64, due: &[&InvoiceRecord]) -> String {
    if due.is_empty() {
        return format!("0 invoices due in the next {} days.", days);
    }

    let plural = if due.len() > 1 { "s" } else { "" };
    let lines: Vec<String> = due
        .iter()
        .map(|inv| {
            format!(
                "- {}, due {}, ${}",
                inv.vendor,
                inv.due_date.format("%Y-%m-%d"),
                format_currency(inv.total, 2)
            )
        })
        .collect();

    format!("{} invoice{}:\n{}", due.len(), plural, lines.join("\n"))
}

pub fn format_vendor_total(vendor: &str, result: &VendorTotal) -> String {
    if !result.is_found() {
        return format!("No invoice found from {}.", vendor.trim());
    }
    format!("${}", format_currency(result.total, 2))
}

pub fn format_vendors_above(amount: f64, invoices: &[&InvoiceRecord]) -> String {
    if invoices.is_empty() {
        return format!("No vendors with invoices > ${}.", format_currency(amount, 2));
    }
    join_vendors(invoices, 0)
}

pub fn format_list_vendors(invoices: &[&InvoiceRecord]) -> String {
    join_vendors(invoices, 2)
}

fn join_vendors(invoices: &[&InvoiceRecord], decimals: usize) -> String {
    invoices
        .iter()
        .map(|inv| format!("{} (${})", inv.vendor, format_currency(inv.total, decimals)))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// TESTS
// ============================================================================
