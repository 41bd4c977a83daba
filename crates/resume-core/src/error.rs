//! Error types for the resume-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for resume parsing.
///
/// Parsing a document only fails with [`ResumeError::DocumentNotFound`] or
/// [`ResumeError::Io`]; PDF and OCR failures are recovered during text
/// acquisition and surface only from the lower-level APIs.
#[derive(Error, Debug)]
pub enum ResumeError {
    #[error(transparent)]
    Pdf(#[from] PdfError),

    #[error(transparent)]
    Ocr(#[from] OcrError),

    /// The input document does not exist.
    #[error("document not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    /// The input document exists but could not be read.
    #[error("cannot read document: {0}")]
    Io(#[from] std::io::Error),

    /// Settings that cannot drive the pipeline.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Failures reading a PDF's structure or text layer.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Bytes are not a loadable PDF.
    #[error("unreadable PDF: {0}")]
    Parse(String),

    /// A page's text layer could not be decoded.
    #[error("text layer extraction failed: {0}")]
    TextExtraction(String),

    /// Encrypted with a non-empty password.
    #[error("PDF is password protected")]
    Encrypted,

    #[error("PDF contains no pages")]
    NoPages,

    /// Page numbers are 1-indexed.
    #[error("page {0} does not exist")]
    InvalidPage(u32),
}

/// Failures of an OCR backend.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Model files are missing or could not be loaded.
    #[error("cannot load OCR models: {0}")]
    ModelLoad(String),

    /// An external OCR tool could not be run or exited with an error.
    #[error("failed to run {tool}: {reason}")]
    Tool { tool: String, reason: String },

    /// No page images could be produced.
    #[error("cannot rasterize document: {0}")]
    Rasterize(String),

    #[error("recognition failed: {0}")]
    Recognition(String),

    /// OCR is switched off in the configuration.
    #[error("OCR is disabled")]
    Disabled,
}

/// Result type for the resume library.
pub type Result<T> = std::result::Result<T, ResumeError>;
