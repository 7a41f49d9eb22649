use std::collections::HashMap;
use std::path::Path;

use gstscan_core::invoice::rules::Field;
use gstscan_core::{
    BatchDirectoryRequest, ExtractionRequest, ExtractionResponse, InvoiceRecord, Month, OcrError,
    Pipeline, SkipReason, TextBox, TextRecognizer, TotalPolicy,
};
use image::{DynamicImage, GenericImageView, ImageFormat};
use pretty_assertions::assert_eq;

/// Returns scripted OCR lines keyed on image width.
struct ScriptedRecognizer {
    pages: HashMap<u32, Vec<&'static str>>,
}

impl ScriptedRecognizer {
    fn new(pages: &[(u32, &[&'static str])]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(width, lines)| (*width, lines.to_vec()))
                .collect(),
        }
    }
}

impl TextRecognizer for ScriptedRecognizer {
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<TextBox>, OcrError> {
        let lines = self
            .pages
            .get(&image.width())
            .ok_or_else(|| OcrError::Recognition("unknown page".to_string()))?;

        Ok(lines
            .iter()
            .enumerate()
            .map(|(i, line)| TextBox::from_rect(10.0, 50.0 * i as f32, 200.0, 12.0, *line))
            .collect())
    }
}

fn write_png(dir: &Path, name: &str, width: u32) {
    DynamicImage::new_rgb8(width, 8)
        .save_with_format(dir.join(name), ImageFormat::Png)
        .unwrap();
}

fn january_pages() -> ScriptedRecognizer {
    ScriptedRecognizer::new(&[
        (
            10,
            &[
                "TAX INVOICE",
                "Invoice Date: 10-01-2024",
                "SGST PAYBLE 90.00",
                "CGST PAYBLE 90.00",
                "Amount in words: Rs. One Thousand Only",
            ],
        ),
        (
            11,
            &[
                "SGST PAYBLE 10.00",
                "Rs. Five Hundred Only",
            ],
        ),
        (
            12,
            &[
                "Invoice Date: 25-01-2024",
                "SGST PAYBLE 45.50",
                "CGST PAYBLE 45.50",
                "Rs. Two Thousand Only",
            ],
        ),
        (
            13,
            &["Invoice Date: 31-02-2024", "Rs. Seven Only"],
        ),
    ])
}

#[test]
fn test_batch_keeps_dated_and_skips_undated() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "A.png", 10);
    write_png(dir.path(), "B.jpg", 11);
    write_png(dir.path(), "notes.txt", 10);

    let pipeline = Pipeline::new(january_pages());
    let report = pipeline
        .process_batch(&BatchDirectoryRequest {
            dir: dir.path().to_path_buf(),
        })
        .unwrap();

    assert_eq!(report.files_scanned, 2);
    assert_eq!(
        report.records,
        vec![InvoiceRecord::new(
            "A",
            Some("10-01-2024".to_string()),
            Some("90.00".to_string()),
            Some("90.00".to_string()),
            Some(1000),
        )]
    );
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].name, "B");
    assert_eq!(report.skipped[0].reason, SkipReason::MissingDate);
}

#[test]
fn test_batch_aggregates_by_month() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "inv-1.png", 10);
    write_png(dir.path(), "inv-2.png", 12);
    write_png(dir.path(), "inv-3.png", 13);

    let pipeline = Pipeline::new(january_pages());
    let report = pipeline
        .process_batch(&BatchDirectoryRequest {
            dir: dir.path().to_path_buf(),
        })
        .unwrap();

    let names: Vec<&str> = report.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["inv-1", "inv-2"]);
    assert_eq!(
        report.skipped[0].reason,
        SkipReason::InvalidDate("31-02-2024".to_string())
    );

    let aggregate = report.aggregate.unwrap();
    assert_eq!(aggregate.series(), vec![("2024-01".to_string(), 3000)]);

    let january = aggregate.get(&Month::new(2024, 1)).unwrap();
    assert_eq!(january.invoices, 2);
    assert_eq!(january.sgst.to_string(), "135.50");
}

#[test]
fn test_batch_continues_past_undecodable_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a-broken.png"), b"not really a png").unwrap();
    write_png(dir.path(), "b-good.png", 10);

    let pipeline = Pipeline::new(january_pages());
    let report = pipeline
        .process_batch(&BatchDirectoryRequest {
            dir: dir.path().to_path_buf(),
        })
        .unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].name, "b-good");
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].name, "a-broken");
    assert!(matches!(report.skipped[0].reason, SkipReason::Decode(_)));
}

#[test]
fn test_batch_progress_callback() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "x.png", 10);
    write_png(dir.path(), "y.png", 12);

    let pipeline = Pipeline::new(january_pages());
    let mut seen = Vec::new();
    pipeline
        .process_batch_with(
            &BatchDirectoryRequest {
                dir: dir.path().to_path_buf(),
            },
            |index, count, path| {
                seen.push((index, count, path.file_name().unwrap().to_owned()));
            },
        )
        .unwrap();

    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].0, 0);
    assert_eq!(seen[1].1, 2);
}

#[test]
fn test_batch_with_no_dated_records_has_no_aggregate() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "only.png", 11);

    let pipeline = Pipeline::new(january_pages());
    let report = pipeline
        .process_batch(&BatchDirectoryRequest {
            dir: dir.path().to_path_buf(),
        })
        .unwrap();

    assert!(report.records.is_empty());
    assert_eq!(report.aggregate, None);
}

#[test]
fn test_single_keeps_undated_record() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "B.jpg", 11);

    let pipeline = Pipeline::new(january_pages());
    let request = ExtractionRequest::from_file(&dir.path().join("B.jpg")).unwrap();
    let ExtractionResponse::Single(single) = pipeline.run(&request).unwrap() else {
        panic!("expected single response");
    };

    assert_eq!(single.record.name, "B.jpg");
    assert_eq!(single.record.date, None);
    assert_eq!(single.record.sgst.as_deref(), Some("10.00"));
    assert_eq!(single.record.total, Some(500));
    assert_eq!(single.missing_fields, vec![Field::Cgst, Field::InvoiceDate]);
    assert_eq!(single.image.dimensions(), (11, 8));
}

#[test]
fn test_single_ocr_failure_strict_vs_lenient() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "unknown.png", 99);
    let request = ExtractionRequest::from_file(&dir.path().join("unknown.png")).unwrap();

    let strict = Pipeline::new(january_pages());
    assert!(strict.run(&request).unwrap_err().as_number_parse().is_some());

    let lenient = Pipeline::new(january_pages()).with_single_policy(TotalPolicy::Lenient);
    let ExtractionResponse::Single(single) = lenient.run(&request).unwrap() else {
        panic!("expected single response");
    };
    assert_eq!(single.record.total, None);
    assert_eq!(single.raw_text, "");
}

#[test]
fn test_batch_reports_ocr_failure_as_ocr_skip() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "crash.png", 99);
    write_png(dir.path(), "fine.png", 10);

    let pipeline = Pipeline::new(january_pages());
    let report = pipeline
        .process_batch(&BatchDirectoryRequest {
            dir: dir.path().to_path_buf(),
        })
        .unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].name, "fine");
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].name, "crash");
    assert!(matches!(
        report.skipped[0].reason,
        SkipReason::Ocr(ref msg) if msg.contains("unknown page")
    ));
}

#[test]
fn test_batch_decodes_by_content_not_extension() {
    let dir = tempfile::tempdir().unwrap();
    // PNG bytes behind a .jpg name
    write_png(dir.path(), "scan.jpg", 10);

    let pipeline = Pipeline::new(january_pages());
    let report = pipeline
        .process_batch(&BatchDirectoryRequest {
            dir: dir.path().to_path_buf(),
        })
        .unwrap();

    assert!(report.skipped.is_empty());
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].total, Some(1000));
}
