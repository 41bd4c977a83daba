//! Education entries in "<degree>, <institution>, <yyyy>-<yyyy>" form.

use super::patterns::EDUCATION_LINE;
use crate::models::record::{EducationEntry, FieldName, FieldValue};
use crate::resume::FieldMatcher;

pub struct EducationMatcher;

impl FieldMatcher for EducationMatcher {
    fn field(&self) -> FieldName {
        FieldName::Education
    }

    fn extract(&self, text: &str) -> Option<FieldValue> {
        let entries = extract_education(text);
        (!entries.is_empty()).then_some(FieldValue::Education(entries))
    }
}

/// Extract every education entry, one or more per line.
pub fn extract_education(text: &str) -> Vec<EducationEntry> {
    text.lines()
        .flat_map(|line| EDUCATION_LINE.captures_iter(line))
        .map(|caps| EducationEntry {
            degree: caps[1].trim().to_string(),
            institution: caps[2].trim().to_string(),
            year: format!("{} - {}", &caps[3], &caps[4]),
        })
        .collect()
}
