//! Configuration structures for the resume pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the resume pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeConfig {
    /// Text acquisition configuration.
    pub acquisition: AcquisitionConfig,

    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Text acquisition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionConfig {
    /// Minimum embedded text length (in characters) to skip OCR.
    pub min_text_length: usize,

    /// Fall back to OCR when the embedded text is too short.
    pub ocr_fallback: bool,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            min_text_length: 50,
            ocr_fallback: true,
        }
    }
}

/// Which OCR engine reads scanned documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrBackendKind {
    /// `pdftoppm` + `tesseract` subprocesses.
    Tesseract,
    /// Pure-Rust ONNX models (requires the `native` feature).
    Onnx,
    /// Never run OCR.
    Disabled,
}

impl Default for OcrBackendKind {
    fn default() -> Self {
        OcrBackendKind::Tesseract
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// OCR engine.
    pub backend: OcrBackendKind,

    /// Recognition language (tesseract code).
    pub language: String,

    /// DPI for rendering PDF pages to images.
    pub render_dpi: u32,

    /// Command used to rasterize PDF pages.
    pub pdftoppm_command: String,

    /// Command used to recognize page images.
    pub tesseract_command: String,

    /// Directory containing ONNX model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Keep `[UNK]` tokens in recognized text instead of blanking them.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            backend: OcrBackendKind::default(),
            language: "eng".to_string(),
            render_dpi: 300,
            pdftoppm_command: "pdftoppm".to_string(),
            tesseract_command: "tesseract".to_string(),
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            keep_unk: false,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Closed skill vocabulary matched case-insensitively as whole words.
    pub skills: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            skills: DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Skill vocabulary used when no configuration overrides it.
pub const DEFAULT_SKILLS: &[&str] = &[
    "python",
    "java",
    "c++",
    "javascript",
    "machine learning",
    "data analysis",
    "sql",
    "html",
    "css",
    "excel",
    "pandas",
    "numpy",
    "matplotlib",
    "scikit-learn",
    "postgresql",
    "mongodb",
    "streamlit",
    "easyocr",
    "nltk",
    "llms",
    "communication",
];

impl ResumeConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.ocr.model_dir.join(model_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResumeConfig::default();
        assert_eq!(config.acquisition.min_text_length, 50);
        assert!(config.acquisition.ocr_fallback);
        assert_eq!(config.ocr.backend, OcrBackendKind::Tesseract);
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.extraction.skills.len(), 21);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ResumeConfig = serde_json::from_str(
            r#"{"acquisition": {"min_text_length": 10}, "ocr": {"backend": "disabled"}}"#,
        )
        .unwrap();
        assert_eq!(config.acquisition.min_text_length, 10);
        assert!(config.acquisition.ocr_fallback);
        assert_eq!(config.ocr.backend, OcrBackendKind::Disabled);
        assert_eq!(config.ocr.render_dpi, 300);
        assert!(config.extraction.skills.contains(&"sql".to_string()));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = ResumeConfig::default();
        config.extraction.skills = vec!["rust".to_string()];
        config.save(&path).unwrap();

        let loaded = ResumeConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.skills, vec!["rust".to_string()]);
        assert_eq!(
            loaded.model_path(&loaded.ocr.detection_model),
            PathBuf::from("models").join("det.onnx")
        );
    }
}
