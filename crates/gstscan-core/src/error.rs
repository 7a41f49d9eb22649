//! Error types for the gstscan-core library.

use thiserror::Error;

/// Main error type for the gstscan library.
#[derive(Error, Debug)]
pub enum GstScanError {
    /// The image could not be opened or decoded.
    #[error("failed to decode image {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    /// OCR engine error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Invoice extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl GstScanError {
    /// Returns the number parse failure, if this error is one.
    pub fn as_number_parse(&self) -> Option<&NumberParseError> {
        match self {
            Self::Extraction(ExtractionError::NumberParse(e)) => Some(e),
            _ => None,
        }
    }
}

/// Errors related to the OCR engine.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),
}

/// Errors related to invoice field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The written-out total could not be turned into a number.
    #[error(transparent)]
    NumberParse(#[from] NumberParseError),

    /// The request carried nothing to process.
    #[error("no input supplied: {0}")]
    NoInput(String),
}

/// Errors from converting a word-form number into an integer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumberParseError {
    /// No total phrase was found on the invoice.
    #[error("no written-out total found")]
    Missing,

    /// The phrase was empty or whitespace only.
    #[error("empty number phrase")]
    Empty,

    /// The phrase contained no number words.
    #[error("no number words found in {0:?}")]
    NoNumberWords(String),

    /// A scale word or `point` appeared more than once.
    #[error("redundant number word {0:?}")]
    Redundant(String),

    /// Scale words appeared out of order.
    #[error("malformed number phrase {0:?}")]
    Malformed(String),

    /// The value does not fit in 64 bits.
    #[error("number too large: {0:?}")]
    Overflow(String),
}

/// Result type for the gstscan library.
pub type Result<T> = std::result::Result<T, GstScanError>;
