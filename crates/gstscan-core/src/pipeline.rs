//! Single entry point from an extraction request to records.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use image::DynamicImage;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{ExtractionError, GstScanError, Result};
use crate::invoice::aggregate::{aggregate_monthly, MonthlyAggregate};
use crate::invoice::assembler::{
    assemble_lenient, assemble_record, batch_record_name, check_batch_record,
    list_invoice_images, TotalPolicy,
};
use crate::invoice::rules::Field;
use crate::invoice::{InvoiceParser, TemplateParser};
use crate::models::config::GstScanConfig;
use crate::models::invoice::{InvoiceRecord, SkipReason, SkippedInvoice};
use crate::ocr::{decode_image, TextExtractor, TextRecognizer};

/// One image supplied directly, e.g. an uploaded file.
#[derive(Debug, Clone)]
pub struct SingleImageRequest {
    /// Original file name, kept as the record name.
    pub name: String,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

/// A directory whose `.jpg`/`.png` files are processed in turn.
#[derive(Debug, Clone)]
pub struct BatchDirectoryRequest {
    pub dir: PathBuf,
}

/// What the caller wants extracted.
#[derive(Debug, Clone)]
pub enum ExtractionRequest {
    SingleImage(SingleImageRequest),
    BatchDirectory(BatchDirectoryRequest),
}

impl ExtractionRequest {
    pub fn single(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::SingleImage(SingleImageRequest {
            name: name.into(),
            bytes,
        })
    }

    pub fn batch(dir: impl Into<PathBuf>) -> Self {
        Self::BatchDirectory(BatchDirectoryRequest { dir: dir.into() })
    }

    /// Read a file into a single-image request named after the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::single(name, bytes))
    }
}

/// Result of a single-image request.
#[derive(Debug, Clone)]
pub struct SingleInvoice {
    pub record: InvoiceRecord,
    /// Decoded image, for display next to the record.
    pub image: DynamicImage,
    /// Recognized text the rules ran over.
    pub raw_text: String,
    /// Fields whose template anchor was not found.
    pub missing_fields: Vec<Field>,
}

/// Result of a batch request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Records that passed the date gate, in file-name order.
    pub records: Vec<InvoiceRecord>,
    /// Items that produced no record.
    pub skipped: Vec<SkippedInvoice>,
    /// Monthly totals; `None` when no record has both a valid date and a total.
    pub aggregate: Option<MonthlyAggregate>,
    /// Number of image files found in the directory.
    pub files_scanned: usize,
}

/// Response matching the request variant.
#[derive(Debug, Clone)]
pub enum ExtractionResponse {
    Single(SingleInvoice),
    Batch(BatchReport),
}

/// OCR plus template rules plus assembly, for either request kind.
pub struct Pipeline<R> {
    extractor: TextExtractor<R>,
    parser: TemplateParser,
    single_policy: TotalPolicy,
}

impl<R: TextRecognizer> Pipeline<R> {
    /// Create a pipeline with default settings.
    pub fn new(recognizer: R) -> Self {
        Self {
            extractor: TextExtractor::new(recognizer),
            parser: TemplateParser::new(),
            single_policy: TotalPolicy::Strict,
        }
    }

    /// Create a pipeline using the OCR and extraction settings of `config`.
    pub fn from_config(recognizer: R, config: &GstScanConfig) -> Self {
        let extractor = TextExtractor::new(recognizer)
            .with_row_tolerance(config.ocr.row_tolerance)
            .with_keep_unk(config.ocr.keep_unk);
        let single_policy = if config.extraction.strict_single_total {
            TotalPolicy::Strict
        } else {
            TotalPolicy::Lenient
        };

        Self {
            extractor,
            parser: TemplateParser::new(),
            single_policy,
        }
    }

    /// Set how single-image requests treat an unusable total.
    pub fn with_single_policy(mut self, policy: TotalPolicy) -> Self {
        self.single_policy = policy;
        self
    }

    /// Run a request to completion.
    pub fn run(&self, request: &ExtractionRequest) -> Result<ExtractionResponse> {
        match request {
            ExtractionRequest::SingleImage(req) => {
                self.process_single(req).map(ExtractionResponse::Single)
            }
            ExtractionRequest::BatchDirectory(req) => {
                self.process_batch(req).map(ExtractionResponse::Batch)
            }
        }
    }

    /// Extract one record from one image. No filtering is applied.
    pub fn process_single(&self, request: &SingleImageRequest) -> Result<SingleInvoice> {
        if request.bytes.is_empty() {
            return Err(ExtractionError::NoInput("no image supplied".to_string()).into());
        }

        let start = Instant::now();
        info!("Processing invoice '{}'", request.name);

        let image = decode_image(&request.name, &request.bytes)?;
        let raw_text = self.extractor.extract_text(&image);
        let fields = self.parser.parse(&raw_text);
        let missing_fields = fields.missing_fields();

        let record = assemble_record(request.name.clone(), &fields, self.single_policy)
            .map_err(ExtractionError::from)?;

        info!(
            "Extracted invoice '{}' in {}ms ({} fields missing)",
            record.name,
            start.elapsed().as_millis(),
            missing_fields.len()
        );

        Ok(SingleInvoice {
            record,
            image,
            raw_text,
            missing_fields,
        })
    }

    /// Extract records from every image in a directory.
    pub fn process_batch(&self, request: &BatchDirectoryRequest) -> Result<BatchReport> {
        self.process_batch_with(request, |_, _, _| {})
    }

    /// Like [`process_batch`](Self::process_batch), calling `on_file` with
    /// `(index, count, path)` before each file is processed.
    pub fn process_batch_with<F>(
        &self,
        request: &BatchDirectoryRequest,
        mut on_file: F,
    ) -> Result<BatchReport>
    where
        F: FnMut(usize, usize, &Path),
    {
        if request.dir.as_os_str().is_empty() {
            return Err(ExtractionError::NoInput("no folder path supplied".to_string()).into());
        }

        let start = Instant::now();
        let files = list_invoice_images(&request.dir)?;
        info!(
            "Found {} invoice images in {}",
            files.len(),
            request.dir.display()
        );

        let mut report = BatchReport {
            files_scanned: files.len(),
            ..BatchReport::default()
        };

        for (index, path) in files.iter().enumerate() {
            on_file(index, files.len(), path);
            let name = batch_record_name(path);

            let candidate = self
                .candidate_from_file(&name, path)
                .and_then(|record| check_batch_record(&record).map(|()| record));

            match candidate {
                Ok(record) => report.records.push(record),
                Err(reason) => {
                    match &reason {
                        SkipReason::MissingDate | SkipReason::InvalidDate(_) => warn!(
                            "Skipping invoice '{}' due to missing or invalid date.",
                            name
                        ),
                        other => warn!("Skipping invoice '{}': {}", name, other),
                    }
                    debug!("Invoice '{}' skip reason: {:?}", name, reason);
                    report.skipped.push(SkippedInvoice { name, reason });
                }
            }
        }

        report.aggregate = aggregate_monthly(&report.records);

        info!(
            "Batch complete: {} records, {} skipped in {}ms",
            report.records.len(),
            report.skipped.len(),
            start.elapsed().as_millis()
        );

        Ok(report)
    }

    /// Decode and recognize one batch file. Content sniffing picks the
    /// decoder, as for single images.
    fn candidate_from_file(
        &self,
        name: &str,
        path: &Path,
    ) -> std::result::Result<InvoiceRecord, SkipReason> {
        let bytes = fs::read(path).map_err(|e| SkipReason::Decode(e.to_string()))?;
        let image = decode_image(name, &bytes).map_err(|e| match e {
            GstScanError::Decode { source, .. } => SkipReason::Decode(source.to_string()),
            other => SkipReason::Decode(other.to_string()),
        })?;

        let text = self
            .extractor
            .try_process(&image)
            .map_err(|e| SkipReason::Ocr(e.to_string()))?
            .text;
        let fields = self.parser.parse(&text);
        Ok(assemble_lenient(name, &fields))
    }
}
