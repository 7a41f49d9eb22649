//! Invoice record models handed to the presentation layer.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::invoice::rules::dates::parse_invoice_date;

/// One finalized invoice row.
///
/// Serializes to the column names shown in tables and JSON output. The
/// validated calendar date is derived once on construction and never
/// serialized; the raw `date` string is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceRecord {
    /// Identifier derived from the source file name.
    #[serde(rename = "Invoice Name")]
    pub name: String,

    /// Invoice date exactly as printed (`DD-MM-YYYY`).
    #[serde(rename = "Date")]
    pub date: Option<String>,

    /// SGST payable as printed.
    #[serde(rename = "SGST Payable")]
    pub sgst: Option<String>,

    /// CGST payable as printed.
    #[serde(rename = "CGST Payable")]
    pub cgst: Option<String>,

    /// Invoice total converted from its written-out form.
    #[serde(rename = "Total")]
    pub total: Option<u64>,

    #[serde(skip)]
    invoice_date: Option<NaiveDate>,
}

impl InvoiceRecord {
    /// Build a record, validating the raw date once.
    pub fn new(
        name: impl Into<String>,
        date: Option<String>,
        sgst: Option<String>,
        cgst: Option<String>,
        total: Option<u64>,
    ) -> Self {
        let invoice_date = date.as_deref().and_then(parse_invoice_date);
        Self {
            name: name.into(),
            date,
            sgst,
            cgst,
            total,
            invoice_date,
        }
    }

    /// Calendar date, if the raw date is a real `DD-MM-YYYY` date.
    pub fn invoice_date(&self) -> Option<NaiveDate> {
        self.invoice_date
    }

    /// Month the invoice falls in, if the date is valid.
    pub fn month(&self) -> Option<Month> {
        self.invoice_date.map(Month::from)
    }

    /// SGST as a decimal amount.
    pub fn sgst_amount(&self) -> Option<Decimal> {
        self.sgst.as_deref().and_then(|s| Decimal::from_str(s).ok())
    }

    /// CGST as a decimal amount.
    pub fn cgst_amount(&self) -> Option<Decimal> {
        self.cgst.as_deref().and_then(|s| Decimal::from_str(s).ok())
    }
}

/// Calendar month key, ordered chronologically and displayed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl From<NaiveDate> for Month {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for Month {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Why a batch item produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// No `Invoice Date` was found.
    MissingDate,
    /// A date was found but is not a real calendar date.
    ///
    /// Such rows are dropped from the batch records, not only from the
    /// monthly aggregate, so they never appear in the batch table.
    InvalidDate(String),
    /// The image could not be decoded.
    Decode(String),
    /// The recognizer failed on the image.
    Ocr(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDate => write!(f, "missing date"),
            Self::InvalidDate(raw) => write!(f, "invalid date {:?}", raw),
            Self::Decode(msg) => write!(f, "undecodable image: {}", msg),
            Self::Ocr(msg) => write!(f, "OCR failed: {}", msg),
        }
    }
}

/// A batch item that was dropped, with its reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedInvoice {
    pub name: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}
