//! Certifications section.

use super::patterns::{
    CERTIFICATIONS_END_LINE, CERTIFICATIONS_END_WORD, CERTIFICATIONS_HEADER_LINE,
    CERTIFICATIONS_HEADER_WORD,
};
use super::sections::{SectionMarkers, section_body};
use crate::models::record::{FieldName, FieldValue};
use crate::resume::FieldMatcher;

pub struct CertificationsMatcher;

impl FieldMatcher for CertificationsMatcher {
    fn field(&self) -> FieldName {
        FieldName::Certifications
    }

    fn extract(&self, text: &str) -> Option<FieldValue> {
        let certs = extract_certifications(text);
        (!certs.is_empty()).then_some(FieldValue::List(certs))
    }
}

/// Lines of the certifications section, up to the next Projects or Skills header.
pub fn extract_certifications(text: &str) -> Vec<String> {
    let markers = SectionMarkers {
        header_line: &CERTIFICATIONS_HEADER_LINE,
        header_word: &CERTIFICATIONS_HEADER_WORD,
        end_line: Some(&CERTIFICATIONS_END_LINE),
        end_word: Some(&CERTIFICATIONS_END_WORD),
    };

    section_body(text, &markers)
        .map(|body| {
            body.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
