//! Image decoding and best-effort text extraction.

use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info, warn};

use crate::error::{GstScanError, OcrError, Result};

use super::{join_lines, sort_by_reading_order, OcrResult, TextRecognizer};

/// Decode raw image bytes, naming the source in the error.
pub fn decode_image(name: &str, bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|source| GstScanError::Decode {
        name: name.to_string(),
        source,
    })
}

/// Runs a recognizer over images and lays the result out as text.
pub struct TextExtractor<R> {
    recognizer: R,
    row_tolerance: f32,
    keep_unk: bool,
}

impl<R: TextRecognizer> TextExtractor<R> {
    pub fn new(recognizer: R) -> Self {
        Self {
            recognizer,
            row_tolerance: 20.0,
            keep_unk: false,
        }
    }

    /// Set the vertical band within which boxes share a line.
    pub fn with_row_tolerance(mut self, tolerance: f32) -> Self {
        self.row_tolerance = tolerance;
        self
    }

    /// Keep `[UNK]` tokens in recognized text.
    pub fn with_keep_unk(mut self, keep: bool) -> Self {
        self.keep_unk = keep;
        self
    }

    /// Run OCR and return boxes plus laid-out text, or the recognizer error.
    pub fn try_process(&self, image: &DynamicImage) -> std::result::Result<OcrResult, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        info!("Processing image: {}x{}", width, height);

        let mut boxes = self.recognizer.recognize(image)?;

        if !self.keep_unk {
            for text_box in &mut boxes {
                text_box.text = text_box.text.replace("[UNK]", " ");
            }
        }

        sort_by_reading_order(&mut boxes, self.row_tolerance);
        let text = join_lines(&boxes, self.row_tolerance);

        if text.trim().is_empty() {
            warn!("OCR returned no text for {}x{} image", width, height);
        }

        let processing_time_ms = start.elapsed().as_millis() as u64;
        debug!(
            "OCR complete: {} text boxes, {} chars in {}ms",
            boxes.len(),
            text.len(),
            processing_time_ms
        );

        Ok(OcrResult {
            boxes,
            text,
            processing_time_ms,
            image_size: (width, height),
        })
    }

    /// Run OCR and return boxes plus laid-out text.
    ///
    /// A recognizer failure is logged and yields an empty result; downstream
    /// rules then simply find nothing.
    pub fn process(&self, image: &DynamicImage) -> OcrResult {
        self.try_process(image).unwrap_or_else(|e| {
            warn!("OCR failed, continuing with empty text: {}", e);
            let (width, height) = image.dimensions();
            OcrResult::empty(width, height)
        })
    }

    /// Convenience: extract text only.
    pub fn extract_text(&self, image: &DynamicImage) -> String {
        self.process(image).text
    }

    /// Decode bytes and extract their text.
    pub fn extract_text_from_bytes(&self, name: &str, bytes: &[u8]) -> Result<String> {
        let image = decode_image(name, bytes)?;
        Ok(self.extract_text(&image))
    }
}
