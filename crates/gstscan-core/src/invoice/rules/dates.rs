//! Invoice date extraction and validation.

use chrono::NaiveDate;

use super::patterns::DATE_DMY_EXACT;
use super::{rule_for, ExtractionMatch, Field, FieldExtractor};

/// Extractor for the `Invoice Date` label.
///
/// Returns the printed date verbatim; no calendar check is made here.
pub struct InvoiceDateExtractor;

impl InvoiceDateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InvoiceDateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InvoiceDateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        rule_for(Field::InvoiceDate).apply(text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        rule_for(Field::InvoiceDate).apply_all(text)
    }
}

/// Extract the labeled invoice date string.
pub fn extract_invoice_date(text: &str) -> Option<ExtractionMatch<String>> {
    InvoiceDateExtractor::new().extract(text)
}

/// Parse a strict `DD-MM-YYYY` string into a calendar date.
pub fn parse_invoice_date(s: &str) -> Option<NaiveDate> {
    if !DATE_DMY_EXACT.is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%d-%m-%Y").ok()
}
