//! OCR text extraction.
//!
//! The pipeline talks to OCR through [`TextRecognizer`]. The native build
//! provides [`PureOcrEngine`], a PaddleOCR runner from `pure-onnx-ocr`.

#[cfg(feature = "native")]
mod engine;
mod extractor;

#[cfg(feature = "native")]
pub use engine::{create_engine, PureOcrEngine};
pub use extractor::{decode_image, TextExtractor};

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// A recognized text box with its coordinates and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Bounding box coordinates (x1, y1, x2, y2, x3, y3, x4, y4) for quadrilateral.
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl TextBox {
    /// Axis-aligned box from its top-left corner and size.
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32, text: impl Into<String>) -> Self {
        Self {
            bbox: [x, y, x + width, y, x + width, y + height, x, y + height],
            text: text.into(),
            confidence: 1.0,
        }
    }

    /// Get the axis-aligned bounding rectangle.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Result of OCR on one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    /// Recognized boxes in reading order.
    pub boxes: Vec<TextBox>,

    /// Full text: boxes on one row joined by spaces, rows by newlines.
    pub text: String,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height).
    pub image_size: (u32, u32),
}

impl OcrResult {
    /// Create an empty result.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            boxes: Vec::new(),
            text: String::new(),
            processing_time_ms: 0,
            image_size: (width, height),
        }
    }
}

/// Anything that can turn pixels into text boxes.
pub trait TextRecognizer {
    /// Recognize text boxes in an image, in any order.
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<TextBox>, OcrError>;
}

impl<R: TextRecognizer + ?Sized> TextRecognizer for Box<R> {
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<TextBox>, OcrError> {
        (**self).recognize(image)
    }
}

/// Group boxes into rows, top-to-bottom, each row left-to-right.
///
/// A box joins the current row when its top edge is within
/// `row_tolerance` of the top edge of the row's first box.
pub fn group_rows(boxes: &[TextBox], row_tolerance: f32) -> Vec<Vec<&TextBox>> {
    let tolerance = row_tolerance.max(0.0);

    let mut by_top: Vec<&TextBox> = boxes.iter().collect();
    by_top.sort_by(|a, b| a.rect().1.total_cmp(&b.rect().1));

    let mut rows: Vec<Vec<&TextBox>> = Vec::new();
    let mut row_top = f32::NEG_INFINITY;

    for text_box in by_top {
        let top = text_box.rect().1;
        match rows.last_mut() {
            Some(row) if (top - row_top).abs() <= tolerance => row.push(text_box),
            _ => {
                rows.push(vec![text_box]);
                row_top = top;
            }
        }
    }

    for row in &mut rows {
        row.sort_by(|a, b| a.rect().0.total_cmp(&b.rect().0));
    }

    rows
}

/// Sort boxes into reading order (top-to-bottom, left-to-right).
pub fn sort_by_reading_order(boxes: &mut [TextBox], row_tolerance: f32) {
    let ordered: Vec<TextBox> = group_rows(boxes, row_tolerance)
        .into_iter()
        .flatten()
        .cloned()
        .collect();
    boxes.clone_from_slice(&ordered);
}

/// Lay boxes out as text: one line per row, boxes joined by spaces.
pub fn join_lines(boxes: &[TextBox], row_tolerance: f32) -> String {
    group_rows(boxes, row_tolerance)
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|b| b.text.trim())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reading_order_and_join() {
        let mut boxes = vec![
            TextBox::from_rect(300.0, 102.0, 100.0, 20.0, "05-03-2024"),
            TextBox::from_rect(10.0, 200.0, 120.0, 20.0, "SGST PAYBLE"),
            TextBox::from_rect(10.0, 100.0, 150.0, 20.0, "Invoice Date:"),
            TextBox::from_rect(200.0, 205.0, 80.0, 20.0, "45.00"),
        ];

        sort_by_reading_order(&mut boxes, 20.0);
        let text = join_lines(&boxes, 20.0);

        assert_eq!(text, "Invoice Date: 05-03-2024\nSGST PAYBLE 45.00");
    }

    #[test]
    fn test_blank_boxes_skipped() {
        let boxes = vec![
            TextBox::from_rect(0.0, 0.0, 10.0, 10.0, "  "),
            TextBox::from_rect(20.0, 0.0, 10.0, 10.0, "Rs."),
        ];
        assert_eq!(join_lines(&boxes, 20.0), "Rs.");
    }

    #[test]
    fn test_row_straddling_band_edge_stays_one_line() {
        let mut boxes = vec![
            TextBox::from_rect(300.0, 41.0, 40.0, 12.0, "Only"),
            TextBox::from_rect(10.0, 39.0, 250.0, 12.0, "Rs. Five Thousand"),
        ];

        sort_by_reading_order(&mut boxes, 20.0);
        assert_eq!(join_lines(&boxes, 20.0), "Rs. Five Thousand Only");
    }

    #[test]
    fn test_row_measured_from_first_box() {
        let boxes = vec![
            TextBox::from_rect(0.0, 0.0, 10.0, 10.0, "a"),
            TextBox::from_rect(20.0, 15.0, 10.0, 10.0, "b"),
            TextBox::from_rect(40.0, 30.0, 10.0, 10.0, "c"),
        ];
        assert_eq!(join_lines(&boxes, 20.0), "a b\nc");
    }

    #[test]
    fn test_nan_coordinates_do_not_panic() {
        let mut boxes = vec![
            TextBox::from_rect(f32::NAN, 0.0, 10.0, 10.0, "x"),
            TextBox::from_rect(0.0, f32::NAN, 10.0, 10.0, "y"),
            TextBox::from_rect(5.0, 1.0, 10.0, 10.0, "z"),
        ];
        sort_by_reading_order(&mut boxes, 20.0);
        assert_eq!(boxes.len(), 3);
    }

    #[test]
    fn test_rect() {
        let b = TextBox::from_rect(5.0, 6.0, 10.0, 4.0, "x");
        assert_eq!(b.rect(), (5.0, 6.0, 15.0, 10.0));
    }
}
