//! OCR backends for scanned resumes.

mod tesseract;
#[cfg(feature = "native")]
mod pure_engine;

pub use tesseract::TesseractOcr;
#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;

use tracing::{debug, warn};

use crate::acquire::Document;
use crate::error::OcrError;
use crate::models::config::{OcrBackendKind, OcrConfig};

/// An engine that reads the text of a scanned document.
///
/// Implementations return recognized fragments in reading order; joining
/// them is the caller's business.
pub trait OcrBackend {
    /// Short engine name for diagnostics.
    fn name(&self) -> &str;

    /// Rasterize the document and recognize every page.
    fn recognize(&self, document: &Document) -> Result<Vec<String>, OcrError>;
}

impl<T: OcrBackend + ?Sized> OcrBackend for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn recognize(&self, document: &Document) -> Result<Vec<String>, OcrError> {
        (**self).recognize(document)
    }
}

/// Backend used when OCR is switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledOcr;

impl OcrBackend for DisabledOcr {
    fn name(&self) -> &str {
        "disabled"
    }

    fn recognize(&self, _document: &Document) -> Result<Vec<String>, OcrError> {
        Err(OcrError::Disabled)
    }
}

/// Build the backend selected in the configuration.
///
/// Construction is cheap for every backend; model loading happens on the
/// first recognition call.
pub fn create_backend(config: &OcrConfig) -> Result<Box<dyn OcrBackend>, OcrError> {
    debug!("Creating OCR backend: {:?}", config.backend);
    match config.backend {
        OcrBackendKind::Tesseract => {
            let ocr = TesseractOcr::new(config);
            if !ocr.is_available() {
                warn!("OCR tools not found, scanned resumes will yield no text");
            }
            Ok(Box::new(ocr))
        }
        #[cfg(feature = "native")]
        OcrBackendKind::Onnx => Ok(Box::new(PureOcrEngine::new(config))),
        #[cfg(not(feature = "native"))]
        OcrBackendKind::Onnx => Err(OcrError::ModelLoad(
            "ONNX backend requires the `native` feature".to_string(),
        )),
        OcrBackendKind::Disabled => Ok(Box::new(DisabledOcr)),
    }
}

/// Vertical distance (pixels) within which boxes count as the same row.
const ROW_TOLERANCE: f32 = 20.0;

/// A recognized text box with its quadrilateral coordinates.
#[derive(Debug, Clone)]
pub struct TextBox {
    /// Bounding box coordinates (x1, y1, x2, y2, x3, y3, x4, y4).
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,
}

impl TextBox {
    /// Get the axis-aligned bounding rectangle.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().copied().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().copied().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Sort boxes top-to-bottom by row, then left-to-right within a row.
pub fn sort_reading_order(boxes: &mut [TextBox]) {
    boxes.sort_by(|a, b| {
        let (ax, ay, _, _) = a.rect();
        let (bx, by, _, _) = b.rect();

        let row_a = (ay / ROW_TOLERANCE) as i32;
        let row_b = (by / ROW_TOLERANCE) as i32;

        row_a
            .cmp(&row_b)
            .then_with(|| ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_box(text: &str, x: f32, y: f32) -> TextBox {
        TextBox {
            bbox: [x, y, x + 50.0, y, x + 50.0, y + 10.0, x, y + 10.0],
            text: text.to_string(),
        }
    }

    #[test]
    fn test_reading_order() {
        let mut boxes = vec![
            text_box("world", 120.0, 102.0),
            text_box("second", 10.0, 160.0),
            text_box("hello", 10.0, 100.0),
        ];
        sort_reading_order(&mut boxes);

        let texts: Vec<&str> = boxes.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["hello", "world", "second"]);
    }

    #[test]
    fn test_rect() {
        let b = text_box("x", 5.0, 7.0);
        assert_eq!(b.rect(), (5.0, 7.0, 55.0, 17.0));
    }

    #[test]
    fn test_disabled_backend() {
        let doc = Document::from_bytes("scan.pdf", Vec::new());
        let backend = create_backend(&OcrConfig {
            backend: OcrBackendKind::Disabled,
            ..OcrConfig::default()
        })
        .unwrap();

        assert_eq!(backend.name(), "disabled");
        assert!(matches!(backend.recognize(&doc), Err(OcrError::Disabled)));
    }

    #[test]
    fn test_create_tesseract_backend() {
        let backend = create_backend(&OcrConfig::default()).unwrap();
        assert_eq!(backend.name(), "tesseract");
    }
}
