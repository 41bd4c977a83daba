//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod parse;

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tracing::debug;

use resume_core::models::config::{OcrBackendKind, ResumeConfig};

/// OCR backend selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OcrBackendArg {
    /// Render with pdftoppm, recognize with tesseract
    Tesseract,
    /// Pure-Rust ONNX detection and recognition models
    Onnx,
    /// Never run OCR
    Disabled,
}

impl From<OcrBackendArg> for OcrBackendKind {
    fn from(arg: OcrBackendArg) -> Self {
        match arg {
            OcrBackendArg::Tesseract => OcrBackendKind::Tesseract,
            OcrBackendArg::Onnx => OcrBackendKind::Onnx,
            OcrBackendArg::Disabled => OcrBackendKind::Disabled,
        }
    }
}

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("resume-parser")
        .join("config.json")
}

/// Load the configuration from an explicit path, the default location, or defaults.
///
/// An explicit path must exist.
pub fn load_config(config_path: Option<&Path>) -> anyhow::Result<ResumeConfig> {
    if let Some(path) = config_path {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        debug!("Loading config from {}", path.display());
        return Ok(ResumeConfig::from_file(path)?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(ResumeConfig::from_file(&default_path)?)
    } else {
        Ok(ResumeConfig::default())
    }
}
