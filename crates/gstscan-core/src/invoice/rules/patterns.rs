//! Regex anchors for the GST invoice template.
//!
//! These encode the printed template literally, including the `PAYBLE`
//! misspelling found on the source invoices.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Tax lines
    pub static ref SGST_PAYABLE: Regex = Regex::new(
        r"(?i)SGST PAYBLE\s+(\d+\.\d+)"
    ).unwrap();

    pub static ref CGST_PAYABLE: Regex = Regex::new(
        r"(?i)CGST PAYBLE\s+(\d+\.\d+)"
    ).unwrap();

    // "Rs. Five Thousand Two Hundred Only"
    pub static ref TOTAL_IN_WORDS: Regex = Regex::new(
        r"(?i)Rs\. ([A-Za-z ]+) Only"
    ).unwrap();

    // Labeled date, label is case-sensitive
    pub static ref INVOICE_DATE: Regex = Regex::new(
        r"Invoice Date\s*:?\s*([0-9][0-9]-[0-9][0-9]-\d{4})"
    ).unwrap();

    // Whole-string DD-MM-YYYY, used when validating a captured date
    pub static ref DATE_DMY_EXACT: Regex = Regex::new(
        r"^[0-9]{2}-[0-9]{2}-[0-9]{4}$"
    ).unwrap();
}
