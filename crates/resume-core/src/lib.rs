//! Core library for resume parsing.
//!
//! This crate provides:
//! - Text acquisition from PDFs (embedded text layer with OCR fallback)
//! - OCR backends (tesseract subprocess, pure-Rust ONNX models)
//! - Rule-based resume field extraction (contact details, skills,
//!   education, certifications, projects)
//! - The resume record model with per-field confidence flags

pub mod acquire;
pub mod error;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod pipeline;
pub mod resume;

pub use acquire::{Document, TextAcquirer, TextSource, TextStream};
pub use error::{OcrError, PdfError, Result, ResumeError};
pub use models::config::ResumeConfig;
pub use models::record::{EducationEntry, Field, FieldName, FieldValue, ProjectEntry, ResumeRecord};
pub use ocr::{OcrBackend, create_backend};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use pipeline::{ParsedResume, ResumeParser};
pub use resume::{FieldExtractor, FieldMatcher};
