// 📊 Aggregator - Pure computations over the invoice collection
// Filters, sums, counts. Results keep the collection's original order.

use crate::invoice::{InvoiceCollection, InvoiceRecord};
use chrono::{Days, NaiveDate};

/// Sum of totals for one vendor. `count == 0` means no invoice was found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VendorTotal {
    pub count: usize,
    pub total: f64,
}

impl VendorTotal {
    pub fn is_found(&self) -> bool {
        self.count > 0
    }
}

pub struct Aggregator<'a> {
    invoices: &'a InvoiceCollection,
}

impl<'a> Aggregator<'a> {
    pub fn new(invoices: &'a InvoiceCollection) -> Self {
        Aggregator { invoices }
    }

    /// Invoices with `reference_date <= due_date <= reference_date + days`.
    pub fn due_within_days(&self, reference_date: NaiveDate, days: u64) -> Vec<&'a InvoiceRecord> {
        // Saturate instead of failing when the window runs off the calendar
        let cutoff = reference_date
            .checked_add_days(Days::new(days))
            .unwrap_or(NaiveDate::MAX);

        self.invoices
            .iter()
            .filter(|inv| reference_date <= inv.due_date && inv.due_date <= cutoff)
            .collect()
    }

    /// Exact vendor match after trimming and lower-casing both sides.
    pub fn vendor_total(&self, name: &str) -> VendorTotal {
        let wanted = name.trim().to_lowercase();

        self.invoices
            .iter()
            .filter(|inv| inv.vendor.trim().to_lowercase() == wanted)
            .fold(VendorTotal { count: 0, total: 0.0 }, |acc, inv| VendorTotal {
                count: acc.count + 1,
                total: acc.total + inv.total,
            })
    }

    /// Invoices strictly above `amount`.
    pub fn vendors_above(&self, amount: f64) -> Vec<&'a InvoiceRecord> {
        self.invoices.iter().filter(|inv| inv.total > amount).collect()
    }

    pub fn list_all(&self) -> Vec<&'a InvoiceRecord> {
        self.invoices.iter().collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
