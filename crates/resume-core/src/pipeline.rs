//! End-to-end resume parsing: text acquisition followed by field extraction.

use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::acquire::{Document, TextAcquirer, TextSource};
use crate::error::{Result, ResumeError};
use crate::models::config::ResumeConfig;
use crate::models::record::ResumeRecord;
use crate::ocr::{OcrBackend, create_backend};
use crate::resume::FieldExtractor;

/// Result of parsing one document, with acquisition details.
#[derive(Debug, Clone)]
pub struct ParsedResume {
    /// Extracted record.
    pub record: ResumeRecord,
    /// Where the text came from.
    pub source: TextSource,
    /// Length of the acquired text in characters.
    pub text_chars: usize,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Resume parser owning both pipeline stages.
pub struct ResumeParser<O: OcrBackend = Box<dyn OcrBackend>> {
    acquirer: TextAcquirer<O>,
    extractor: FieldExtractor,
}

impl ResumeParser<Box<dyn OcrBackend>> {
    /// Build a parser with the OCR backend selected in the configuration.
    pub fn from_config(config: &ResumeConfig) -> Result<Self> {
        if config.ocr.render_dpi == 0 {
            return Err(ResumeError::Config("ocr.render_dpi must be positive".to_string()));
        }
        if config.ocr.language.trim().is_empty() {
            return Err(ResumeError::Config("ocr.language must not be empty".to_string()));
        }

        let backend = create_backend(&config.ocr)?;
        Ok(Self::new(
            TextAcquirer::new(config.acquisition.clone(), backend),
            FieldExtractor::new(&config.extraction),
        ))
    }
}

impl<O: OcrBackend> ResumeParser<O> {
    pub fn new(acquirer: TextAcquirer<O>, extractor: FieldExtractor) -> Self {
        Self { acquirer, extractor }
    }

    /// Parse a resume PDF into a record.
    ///
    /// Fails only when the file cannot be read.
    pub fn parse(&self, path: impl AsRef<Path>) -> Result<ResumeRecord> {
        Ok(self.parse_detailed(path)?.record)
    }

    /// Parse a resume PDF and report how its text was obtained.
    pub fn parse_detailed(&self, path: impl AsRef<Path>) -> Result<ParsedResume> {
        let document = Document::open(path)?;
        Ok(self.parse_document(&document))
    }

    /// Parse a document already in memory.
    pub fn parse_document(&self, document: &Document) -> ParsedResume {
        let start = Instant::now();
        info!("Parsing resume {}", document.path().display());

        let text = self.acquirer.acquire_document(document);
        let record = self.extractor.extract(text.as_str());

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Parsed {} in {}ms ({} text)",
            document.path().display(),
            processing_time_ms,
            text.source()
        );

        ParsedResume {
            record,
            source: text.source(),
            text_chars: text.as_str().chars().count(),
            processing_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::OcrBackendKind;
    use crate::models::record::{FieldName, FieldValue};
    use crate::pdf::fixtures::text_pdf;
    use pretty_assertions::assert_eq;

    fn offline_config() -> ResumeConfig {
        let mut config = ResumeConfig::default();
        config.ocr.backend = OcrBackendKind::Disabled;
        config
    }

    #[test]
    fn test_parse_text_pdf() {
        let data = text_pdf(&[&[
            "Jane Doe",
            "jane.doe@example.com 9876543210",
            "Skills",
            "Python, Java, cooking",
            "B.Tech, MIT, 2018-2022",
        ]]);
        let parser = ResumeParser::from_config(&offline_config()).unwrap();
        let parsed = parser.parse_document(&Document::from_bytes("jane.pdf", data));

        assert_eq!(parsed.source, TextSource::Embedded);
        assert_eq!(
            parsed.record.value(FieldName::Name).and_then(FieldValue::as_text),
            Some("Jane Doe")
        );
        assert_eq!(
            parsed.record.value(FieldName::Skills).and_then(FieldValue::as_list),
            Some(&["python".to_string(), "java".to_string()][..])
        );
        assert_eq!(parsed.record.confidence(FieldName::Education), 1);
        assert_eq!(parsed.record.confidence(FieldName::Experience), 0);
    }

    #[test]
    fn test_unreadable_pdf_yields_empty_record() {
        let parser = ResumeParser::from_config(&offline_config()).unwrap();
        let parsed = parser.parse_document(&Document::from_bytes("scan.pdf", b"not a pdf".to_vec()));

        assert_eq!(parsed.source, TextSource::None);
        assert_eq!(parsed.text_chars, 0);
        assert_eq!(parsed.record, ResumeRecord::new());
    }

    #[test]
    fn test_parse_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        std::fs::write(
            &path,
            text_pdf(&[&["John Smith", "john.smith@example.org", "Certifications", "CKA"]]),
        )
        .unwrap();

        let parser = ResumeParser::from_config(&offline_config()).unwrap();
        let record = parser.parse(&path).unwrap();

        assert_eq!(
            record.value(FieldName::Certifications).cloned(),
            Some(FieldValue::List(vec!["CKA".to_string()]))
        );
    }

    #[test]
    fn test_missing_file() {
        let parser = ResumeParser::from_config(&offline_config()).unwrap();
        let err = parser.parse("/nonexistent/resume.pdf").unwrap_err();
        assert!(matches!(err, ResumeError::DocumentNotFound(_)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = offline_config();
        config.ocr.render_dpi = 0;
        assert!(matches!(
            ResumeParser::from_config(&config),
            Err(ResumeError::Config(_))
        ));
    }
}
