// 🧾 Invoice Data - Read-only invoice records
// Built-in sample set plus a CSV loader for real data

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

// ============================================================================
// INVOICE RECORD
// ============================================================================

/// One parsed invoice. Fields are assumed valid upstream (due_date >= invoice_date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Vendor display name, compared case-insensitively
    pub vendor: String,

    pub invoice_number: String,

    /// ISO 8601 on the wire ("2025-08-20")
    pub invoice_date: NaiveDate,

    pub due_date: NaiveDate,

    /// Invoice total in dollars
    pub total: f64,
}

impl InvoiceRecord {
    pub fn new(
        vendor: impl Into<String>,
        invoice_number: impl Into<String>,
        invoice_date: NaiveDate,
        due_date: NaiveDate,
        total: f64,
    ) -> Self {
        InvoiceRecord {
            vendor: vendor.into(),
            invoice_number: invoice_number.into(),
            invoice_date,
            due_date,
            total,
        }
    }
}

// ============================================================================
// INVOICE COLLECTION
// ============================================================================

/// Ordered invoices. Insertion order is the display order and never changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceCollection {
    records: Vec<InvoiceRecord>,
}

impl InvoiceCollection {
    pub fn new(records: Vec<InvoiceRecord>) -> Self {
        InvoiceCollection { records }
    }

    /// The two invoices shipped with the chatbot
    pub fn sample() -> Result<Self> {
        read_invoices(csv::Reader::from_reader(SAMPLE_CSV.as_bytes()))
            .context("Built-in sample invoices are malformed")
    }

    pub fn records(&self) -> &[InvoiceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InvoiceRecord> {
        self.records.iter()
    }

    /// Pretty JSON array, used as context for the inference prompt
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.records).context("Failed to serialize invoices")
    }
}

impl From<Vec<InvoiceRecord>> for InvoiceCollection {
    fn from(records: Vec<InvoiceRecord>) -> Self {
        InvoiceCollection::new(records)
    }
}

impl<'a> IntoIterator for &'a InvoiceCollection {
    type Item = &'a InvoiceRecord;
    type IntoIter = std::slice::Iter<'a, InvoiceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ============================================================================
// CSV LOADER
// ============================================================================

const SAMPLE_CSV: &str = "\
vendor,invoice_number,invoice_date,due_date,total
Amazon,INV-0012,2025-08-20,2025-09-05,2450.00
Microsoft,INV-0043,2025-08-25,2025-09-10,3100.00
";

/// Load invoices from a CSV with header
/// `vendor,invoice_number,invoice_date,due_date,total`.
pub fn load_csv(csv_path: &Path) -> Result<InvoiceCollection> {
    let rdr = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {:?}", csv_path))?;
    read_invoices(rdr)
}

fn read_invoices<R: io::Read>(mut rdr: csv::Reader<R>) -> Result<InvoiceCollection> {
    let mut records = Vec::new();

    for (index, result) in rdr.deserialize().enumerate() {
        let record: InvoiceRecord = result
            .with_context(|| format!("Failed to deserialize invoice on row {}", index + 1))?;
        records.push(record);
    }

    Ok(InvoiceCollection::from(records))
}

// ============================================================================
// TESTS
// ============================================================================
