//! Text acquisition: embedded text layer first, OCR when it is too thin.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{PdfError, Result, ResumeError};
use crate::models::config::AcquisitionConfig;
use crate::ocr::OcrBackend;
use crate::pdf::{PdfExtractor, PdfProcessor};

/// A PDF read fully into memory. The file handle is closed once `open` returns.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    data: Vec<u8>,
}

impl Document {
    /// Read a document from disk.
    ///
    /// This is the only hard failure of the pipeline: a path that does not
    /// exist or cannot be read has no meaningful degraded output.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ResumeError::DocumentNotFound(path.to_path_buf()),
            _ => ResumeError::Io(e),
        })?;
        debug!("Read {} bytes from {}", data.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    /// Wrap bytes that are already in memory.
    pub fn from_bytes(path: impl Into<PathBuf>, data: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            data,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Which acquisition path produced a text stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSource {
    /// The PDF's own text layer.
    Embedded,
    /// Optical character recognition.
    Ocr,
    /// Nothing could be read.
    None,
}

impl fmt::Display for TextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextSource::Embedded => "embedded",
            TextSource::Ocr => "ocr",
            TextSource::None => "none",
        };
        f.write_str(name)
    }
}

/// The flattened text of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStream {
    text: String,
    source: TextSource,
}

impl TextStream {
    fn new(text: String, source: TextSource) -> Self {
        let source = if text.is_empty() { TextSource::None } else { source };
        Self { text, source }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> TextSource {
        self.source
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl AsRef<str> for TextStream {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Produces one text stream per document, choosing between the embedded
/// text layer and OCR with a character-count threshold.
pub struct TextAcquirer<O: OcrBackend> {
    config: AcquisitionConfig,
    ocr: O,
}

impl<O: OcrBackend> TextAcquirer<O> {
    pub fn new(config: AcquisitionConfig, ocr: O) -> Self {
        Self { config, ocr }
    }

    /// Read and acquire a document from disk.
    ///
    /// Fails only when the file cannot be read; every extraction problem
    /// degrades to partial or empty text.
    pub fn acquire(&self, path: impl AsRef<Path>) -> Result<TextStream> {
        let document = Document::open(path)?;
        Ok(self.acquire_document(&document))
    }

    /// Acquire text from a document already in memory.
    pub fn acquire_document(&self, document: &Document) -> TextStream {
        info!("Extracting embedded text from {}", document.path().display());
        let embedded = self.extract_embedded(document);

        if !self.needs_ocr(&embedded) {
            info!("Using embedded text layer ({} chars)", embedded.chars().count());
            return TextStream::new(embedded, TextSource::Embedded);
        }

        if !self.config.ocr_fallback {
            warn!(
                "Embedded text is below {} chars and OCR fallback is disabled",
                self.config.min_text_length
            );
            return TextStream::new(embedded, TextSource::Embedded);
        }

        info!("Switching to OCR extraction with {}", self.ocr.name());
        let recognized = self.recognize(document);
        if recognized.is_empty() && !embedded.is_empty() {
            warn!("OCR produced no text, keeping the short embedded text");
            return TextStream::new(embedded, TextSource::Embedded);
        }

        TextStream::new(recognized, TextSource::Ocr)
    }

    /// Sufficiency heuristic: fewer characters than the threshold means the
    /// document is treated as scanned.
    pub fn needs_ocr(&self, text: &str) -> bool {
        text.chars().count() < self.config.min_text_length
    }

    fn extract_embedded(&self, document: &Document) -> String {
        match read_text_layer(document.data()) {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!("PDF text extraction failed: {}", e);
                String::new()
            }
        }
    }

    fn recognize(&self, document: &Document) -> String {
        match self.ocr.recognize(document) {
            Ok(fragments) => {
                let text = fragments.join(" ").trim().to_string();
                info!("OCR produced {} chars from {} fragments", text.chars().count(), fragments.len());
                text
            }
            Err(e) => {
                warn!("OCR extraction failed: {}", e);
                String::new()
            }
        }
    }
}

fn read_text_layer(data: &[u8]) -> std::result::Result<String, PdfError> {
    let mut pdf = PdfExtractor::new();
    pdf.load(data)?;
    pdf.extract_text()
}
