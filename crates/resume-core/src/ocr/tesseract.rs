//! OCR through the `pdftoppm` and `tesseract` command-line tools.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, warn};

use super::OcrBackend;
use crate::acquire::Document;
use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// Renders pages with poppler's `pdftoppm`, then reads each page image
/// with `tesseract` in a single configured language.
pub struct TesseractOcr {
    language: String,
    dpi: u32,
    pdftoppm: String,
    tesseract: String,
}

impl TesseractOcr {
    /// Create a backend from OCR configuration.
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            language: config.language.clone(),
            dpi: config.render_dpi,
            pdftoppm: config.pdftoppm_command.clone(),
            tesseract: config.tesseract_command.clone(),
        }
    }

    /// Check whether both tools can be launched.
    pub fn is_available(&self) -> bool {
        let pdftoppm = Command::new(&self.pdftoppm).arg("-v").output().is_ok();
        let tesseract = Command::new(&self.tesseract).arg("--version").output().is_ok();

        if !pdftoppm {
            debug!("{} not found - install poppler-utils for OCR support", self.pdftoppm);
        }
        if !tesseract {
            debug!("{} not found - install tesseract-ocr for OCR support", self.tesseract);
        }

        pdftoppm && tesseract
    }

    /// Render every page of `pdf` to PNG files under `out_dir`, in page order.
    fn rasterize(&self, pdf: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, OcrError> {
        let output = Command::new(&self.pdftoppm)
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(pdf)
            .arg(out_dir.join("page"))
            .output()
            .map_err(|e| tool_error(&self.pdftoppm, e))?;

        if !output.status.success() {
            return Err(OcrError::Rasterize(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        // pdftoppm zero-pads page numbers, so name order is page order.
        let mut pages: Vec<PathBuf> = std::fs::read_dir(out_dir)
            .map_err(|e| OcrError::Rasterize(e.to_string()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "png"))
            .collect();
        pages.sort();

        if pages.is_empty() {
            return Err(OcrError::Rasterize("pdftoppm produced no images".to_string()));
        }
        Ok(pages)
    }

    fn recognize_page(&self, image: &Path) -> Result<String, OcrError> {
        let output = Command::new(&self.tesseract)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg("1")
            .output()
            .map_err(|e| tool_error(&self.tesseract, e))?;

        if !output.status.success() {
            warn!(
                "tesseract reported a problem on {}: {}",
                image.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl OcrBackend for TesseractOcr {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, document: &Document) -> Result<Vec<String>, OcrError> {
        // The temp dir and everything rendered into it go away on every exit path.
        let workdir = tempfile::tempdir().map_err(|e| OcrError::Rasterize(e.to_string()))?;
        let input = workdir.path().join("input.pdf");
        std::fs::write(&input, document.data()).map_err(|e| OcrError::Rasterize(e.to_string()))?;

        let pages = self.rasterize(&input, workdir.path())?;
        info!(
            "Rendered {} pages at {} dpi, running tesseract ({})",
            pages.len(),
            self.dpi,
            self.language
        );

        let mut fragments = Vec::new();
        for (i, page) in pages.iter().enumerate() {
            let text = self.recognize_page(page)?;
            let before = fragments.len();
            fragments.extend(
                text.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string),
            );
            debug!("Page {}: {} fragments", i + 1, fragments.len() - before);
        }

        Ok(fragments)
    }
}

fn tool_error(tool: &str, err: std::io::Error) -> OcrError {
    OcrError::Tool {
        tool: tool.to_string(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_tools(pdftoppm: &str, tesseract: &str) -> OcrConfig {
        OcrConfig {
            pdftoppm_command: pdftoppm.to_string(),
            tesseract_command: tesseract.to_string(),
            ..OcrConfig::default()
        }
    }

    #[test]
    fn test_new_reads_config() {
        let ocr = TesseractOcr::new(&OcrConfig {
            language: "deu".to_string(),
            render_dpi: 150,
            ..OcrConfig::default()
        });
        assert_eq!(ocr.language, "deu");
        assert_eq!(ocr.dpi, 150);
        assert_eq!(ocr.name(), "tesseract");
    }

    #[test]
    fn test_missing_rasterizer_is_tool_error() {
        let ocr = TesseractOcr::new(&config_with_tools(
            "/nonexistent/bin/pdftoppm",
            "/nonexistent/bin/tesseract",
        ));
        let doc = Document::from_bytes("scan.pdf", b"%PDF-1.5".to_vec());

        let err = ocr.recognize(&doc).unwrap_err();
        match err {
            OcrError::Tool { tool, .. } => assert_eq!(tool, "/nonexistent/bin/pdftoppm"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!ocr.is_available());
    }
}
