//! Builds invoice records from parsed fields and applies the batch gate.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::NumberParseError;
use crate::models::invoice::{InvoiceRecord, SkipReason};

use super::parser::ExtractedFields;
use super::words::{words_to_number, words_to_number_opt};

/// Image extensions picked up when scanning a directory. Matched
/// case-sensitively against the end of the file name.
pub const IMAGE_SUFFIXES: [&str; 2] = [".jpg", ".png"];

/// How an unusable written-out total is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalPolicy {
    /// Missing or unconvertible total fails the record.
    Strict,
    /// Missing or unconvertible total becomes a null total.
    Lenient,
}

/// Combine parsed fields with the file identity into one record.
pub fn assemble_record(
    name: impl Into<String>,
    fields: &ExtractedFields,
    policy: TotalPolicy,
) -> Result<InvoiceRecord, NumberParseError> {
    match policy {
        TotalPolicy::Strict => assemble_strict(name, fields),
        TotalPolicy::Lenient => Ok(assemble_lenient(name, fields)),
    }
}

/// Build a record whose total must convert.
pub fn assemble_strict(
    name: impl Into<String>,
    fields: &ExtractedFields,
) -> Result<InvoiceRecord, NumberParseError> {
    let total = words_to_number_opt(total_words(fields))?;
    Ok(build(name.into(), fields, Some(total)))
}

/// Build a record, nulling a missing or unconvertible total.
///
/// The converter is only invoked when a total phrase was found.
pub fn assemble_lenient(name: impl Into<String>, fields: &ExtractedFields) -> InvoiceRecord {
    let name = name.into();
    let total = total_words(fields).and_then(|words| match words_to_number(words) {
        Ok(n) => Some(n),
        Err(e) => {
            warn!("Invoice '{}': total {:?} not usable: {}", name, words, e);
            None
        }
    });
    build(name, fields, total)
}

fn total_words(fields: &ExtractedFields) -> Option<&str> {
    fields.total_words.as_ref().map(|m| m.value.as_str())
}

fn build(name: String, fields: &ExtractedFields, total: Option<u64>) -> InvoiceRecord {
    InvoiceRecord::new(
        name,
        fields.date.as_ref().map(|m| m.value.clone()),
        fields.sgst.as_ref().map(|m| m.value.clone()),
        fields.cgst.as_ref().map(|m| m.value.clone()),
        total,
    )
}

/// Batch validity gate: a record needs a real calendar date.
pub fn check_batch_record(record: &InvoiceRecord) -> Result<(), SkipReason> {
    match (&record.date, record.invoice_date()) {
        (None, _) => Err(SkipReason::MissingDate),
        (Some(raw), None) => Err(SkipReason::InvalidDate(raw.clone())),
        (Some(_), Some(_)) => Ok(()),
    }
}

/// Whether a file name carries one of the scanned image extensions.
pub fn is_invoice_image(file_name: &str) -> bool {
    IMAGE_SUFFIXES.iter().any(|suffix| file_name.ends_with(suffix))
}

/// List invoice images directly inside `dir`, ordered by file name.
pub fn list_invoice_images(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_invoice_image);

        if matches && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Record name for a batch file: the file name without its extension.
pub fn batch_record_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::parser::{InvoiceParser, TemplateParser};
    use pretty_assertions::assert_eq;

    fn fields(text: &str) -> ExtractedFields {
        TemplateParser::new().parse(text)
    }

    #[test]
    fn test_assemble_full_record() {
        let f = fields("Invoice Date: 10-01-2024 SGST PAYBLE 45.00 CGST PAYBLE 45.00 Rs. One Thousand Only");
        let record = assemble_record("inv.png", &f, TotalPolicy::Strict).unwrap();

        assert_eq!(record.name, "inv.png");
        assert_eq!(record.date.as_deref(), Some("10-01-2024"));
        assert_eq!(record.sgst.as_deref(), Some("45.00"));
        assert_eq!(record.cgst.as_deref(), Some("45.00"));
        assert_eq!(record.total, Some(1000));
    }

    #[test]
    fn test_strict_policy_requires_total() {
        let f = fields("Invoice Date: 10-01-2024");
        assert_eq!(
            assemble_record("a", &f, TotalPolicy::Strict),
            Err(NumberParseError::Missing)
        );
    }

    #[test]
    fn test_lenient_policy_nulls_total() {
        let f = fields("Invoice Date: 10-01-2024 Rs. Thousand Thousand Only");
        let record = assemble_record("a", &f, TotalPolicy::Lenient).unwrap();
        assert_eq!(record.total, None);

        let record = assemble_record("b", &fields(""), TotalPolicy::Lenient).unwrap();
        assert_eq!(record.total, None);
        assert_eq!(record.date, None);
    }

    #[test]
    fn test_batch_gate() {
        let ok = InvoiceRecord::new("a", Some("10-01-2024".into()), None, None, None);
        let missing = InvoiceRecord::new("b", None, None, None, Some(1));
        let invalid = InvoiceRecord::new("c", Some("99-99-2024".into()), None, None, None);

        assert_eq!(check_batch_record(&ok), Ok(()));
        assert_eq!(check_batch_record(&missing), Err(SkipReason::MissingDate));
        assert_eq!(
            check_batch_record(&invalid),
            Err(SkipReason::InvalidDate("99-99-2024".into()))
        );
    }

    #[test]
    fn test_is_invoice_image() {
        assert!(is_invoice_image("a.jpg"));
        assert!(is_invoice_image("scan.2024.png"));
        assert!(!is_invoice_image("a.JPG"));
        assert!(!is_invoice_image("a.jpeg"));
        assert!(!is_invoice_image("notes.txt"));
    }

    #[test]
    fn test_list_invoice_images() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.jpg", "c.txt", "d.PNG"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let files = list_invoice_images(dir.path()).unwrap();
        let names: Vec<String> = files.iter().map(|p| batch_record_name(p)).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_list_missing_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_invoice_images(&dir.path().join("nope")).is_err());
    }
}
