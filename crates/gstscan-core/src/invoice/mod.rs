//! Invoice field extraction, record assembly and aggregation.

pub mod aggregate;
pub mod assembler;
mod parser;
pub mod rules;
pub mod words;

pub use aggregate::{aggregate_monthly, MonthTotals, MonthlyAggregate};
pub use assembler::{
    assemble_lenient, assemble_record, assemble_strict, check_batch_record, list_invoice_images,
    TotalPolicy,
};
pub use parser::{ExtractedFields, InvoiceParser, TemplateParser};
pub use words::{words_to_number, words_to_number_opt};
