//! Core library for GST invoice scanning.
//!
//! This crate provides:
//! - OCR over invoice images behind the [`TextRecognizer`] seam
//! - Template rules for SGST, CGST, written-out total and invoice date
//! - Word-form number conversion
//! - Record assembly, the batch date gate and monthly aggregation

pub mod error;
pub mod invoice;
pub mod models;
pub mod ocr;
pub mod pipeline;

pub use error::{ExtractionError, GstScanError, NumberParseError, OcrError, Result};
pub use invoice::{aggregate_monthly, words_to_number, MonthTotals, MonthlyAggregate, TotalPolicy};
pub use models::config::GstScanConfig;
pub use models::invoice::{InvoiceRecord, Month, SkipReason, SkippedInvoice};
pub use ocr::{OcrResult, TextBox, TextExtractor, TextRecognizer};
#[cfg(feature = "native")]
pub use ocr::{create_engine, PureOcrEngine};
pub use pipeline::{
    BatchDirectoryRequest, BatchReport, ExtractionRequest, ExtractionResponse, Pipeline,
    SingleImageRequest, SingleInvoice,
};
