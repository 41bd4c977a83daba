//! Pure Rust OCR engine wrapper using `pure-onnx-ocr`.

use std::path::PathBuf;
use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use once_cell::unsync::OnceCell;
use tracing::{debug, info, warn};

use super::{OcrBackend, TextBox, sort_reading_order};
use crate::acquire::Document;
use crate::error::OcrError;
use crate::models::config::OcrConfig;
use crate::pdf::{PdfExtractor, PdfProcessor};

/// OCR engine backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).
///
/// Scanned resumes carry each page as an embedded image, so "rasterizing"
/// means pulling those images out of the PDF. Models load on first use.
pub struct PureOcrEngine {
    det_path: PathBuf,
    rec_path: PathBuf,
    dict_path: PathBuf,
    keep_unk: bool,
    engine: OnceCell<pure_onnx_ocr::engine::OcrEngine>,
}

impl PureOcrEngine {
    /// Create an engine reading model files named in the configuration.
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            det_path: config.model_dir.join(&config.detection_model),
            rec_path: config.model_dir.join(&config.recognition_model),
            dict_path: config.model_dir.join(&config.dictionary),
            keep_unk: config.keep_unk,
            engine: OnceCell::new(),
        }
    }

    fn engine(&self) -> Result<&pure_onnx_ocr::engine::OcrEngine, OcrError> {
        self.engine.get_or_try_init(|| {
            for path in [&self.det_path, &self.rec_path, &self.dict_path] {
                if !path.exists() {
                    return Err(OcrError::ModelLoad(format!(
                        "missing model file {}",
                        path.display()
                    )));
                }
            }

            let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
                .det_model_path(&self.det_path)
                .rec_model_path(&self.rec_path)
                .dictionary_path(&self.dict_path)
                .build()
                .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

            info!("Loaded pure-onnx-ocr engine from {}", self.det_path.display());
            Ok(engine)
        })
    }

    /// Recognize one page image, boxes in reading order.
    pub fn process(&self, image: &DynamicImage) -> Result<Vec<TextBox>, OcrError> {
        let engine = self.engine()?;
        let start = Instant::now();
        let (width, height) = image.dimensions();

        debug!("Processing image: {}x{}", width, height);

        let results = engine
            .run_from_image(image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        let mut boxes: Vec<TextBox> = results
            .iter()
            .map(|r| TextBox {
                bbox: polygon_to_bbox(&r.bounding_box),
                text: if self.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                },
            })
            .collect();
        sort_reading_order(&mut boxes);

        debug!(
            "OCR complete: {} text boxes in {}ms",
            boxes.len(),
            start.elapsed().as_millis()
        );
        Ok(boxes)
    }
}

impl OcrBackend for PureOcrEngine {
    fn name(&self) -> &str {
        "onnx"
    }

    fn recognize(&self, document: &Document) -> Result<Vec<String>, OcrError> {
        let mut pdf = PdfExtractor::new();
        pdf.load(document.data())
            .map_err(|e| OcrError::Rasterize(e.to_string()))?;

        let mut images = Vec::new();
        for page in pdf.page_numbers() {
            match pdf.extract_images(page) {
                Ok(found) => images.extend(found),
                Err(e) => warn!("Failed to extract images from page {}: {}", page, e),
            }
        }
        if images.is_empty() {
            debug!("No page-level images, scanning all objects");
            images = pdf.extract_all_images();
        }
        if images.is_empty() {
            return Err(OcrError::Rasterize("no page images found in PDF".to_string()));
        }

        info!("Running pure-onnx-ocr on {} page images", images.len());

        let mut fragments = Vec::new();
        for image in &images {
            fragments.extend(
                self.process(image)?
                    .into_iter()
                    .map(|b| b.text.trim().to_string())
                    .filter(|t| !t.is_empty()),
            );
        }
        Ok(fragments)
    }
}

/// Convert a `Polygon<f64>` to our `[f32; 8]` bbox format.
fn polygon_to_bbox(polygon: &pure_onnx_ocr::Polygon<f64>) -> [f32; 8] {
    let mut bbox = [0.0f32; 8];
    for (i, coord) in polygon.exterior().coords().take(4).enumerate() {
        bbox[i * 2] = coord.x as f32;
        bbox[i * 2 + 1] = coord.y as f32;
    }
    bbox
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_models_fail_on_first_use() {
        let engine = PureOcrEngine::new(&OcrConfig {
            model_dir: PathBuf::from("/nonexistent/models"),
            ..OcrConfig::default()
        });
        let image = DynamicImage::new_rgb8(4, 4);

        let err = engine.process(&image).unwrap_err();
        assert!(matches!(err, OcrError::ModelLoad(_)));
    }

    #[test]
    fn test_recognize_rejects_non_pdf() {
        let engine = PureOcrEngine::new(&OcrConfig::default());
        let doc = Document::from_bytes("scan.pdf", b"not a pdf".to_vec());

        assert!(matches!(engine.recognize(&doc), Err(OcrError::Rasterize(_))));
    }
}
