//! Matcher registry that turns a text stream into a resume record.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, info, warn};

use super::FieldMatcher;
use super::rules::{
    CertificationsMatcher, EducationMatcher, NameMatcher, PatternMatcher, ProjectsMatcher,
    SkillsMatcher,
};
use crate::models::config::ExtractionConfig;
use crate::models::record::{Field, ResumeRecord};

/// Runs every registered matcher over the text and normalizes missing fields.
pub struct FieldExtractor {
    matchers: Vec<Box<dyn FieldMatcher>>,
}

impl FieldExtractor {
    /// Extractor with the standard matchers and the configured skill vocabulary.
    ///
    /// `experience` has no matcher and always comes out missing.
    pub fn new(config: &ExtractionConfig) -> Self {
        Self::with_matchers(vec![
            Box::new(NameMatcher),
            Box::new(PatternMatcher::email()),
            Box::new(PatternMatcher::phone()),
            Box::new(PatternMatcher::linkedin()),
            Box::new(PatternMatcher::github()),
            Box::new(SkillsMatcher::from_config(config)),
            Box::new(EducationMatcher),
            Box::new(CertificationsMatcher),
            Box::new(ProjectsMatcher),
        ])
    }

    /// Extractor with an explicit matcher list.
    pub fn with_matchers(matchers: Vec<Box<dyn FieldMatcher>>) -> Self {
        Self { matchers }
    }

    /// Add a matcher. A later matcher for the same field replaces an earlier result.
    pub fn register(&mut self, matcher: Box<dyn FieldMatcher>) {
        self.matchers.push(matcher);
    }

    pub fn matcher_count(&self) -> usize {
        self.matchers.len()
    }

    /// Extract all fields. Never fails; unmatched fields are `(null, 0)`.
    pub fn extract(&self, text: &str) -> ResumeRecord {
        let mut record = ResumeRecord::new();

        for matcher in &self.matchers {
            let name = matcher.field();
            match panic::catch_unwind(AssertUnwindSafe(|| matcher.extract(text))) {
                Ok(Some(value)) => {
                    debug!("Matched {}", name);
                    record.set(name, Field::found(value));
                }
                Ok(None) => debug!("No match for {}", name),
                Err(_) => warn!("Matcher for {} panicked, leaving it missing", name),
            }
        }

        let missing = record.missing_fields();
        for name in &missing {
            warn!("Missing field detected: {}", name);
        }
        info!(
            "Extracted {} of {} fields",
            record.iter().count() - missing.len(),
            record.iter().count()
        );

        record
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{EducationEntry, FieldName, FieldValue, ProjectEntry};
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "Jane Doe
jane.doe@example.com | 9876543210
https://www.linkedin.com/in/janedoe https://github.com/janedoe
Skills
Python, SQL, Machine Learning, cooking
Education
B.Tech, MIT, 2018-2022
Certifications
AWS Associate
Scrum Master
Projects
Resume Parser:
Parses PDF resumes
into JSON.
";

    fn text(value: &str) -> Option<FieldValue> {
        Some(FieldValue::Text(value.to_string()))
    }

    #[test]
    fn test_contact_lines() {
        let record = FieldExtractor::default()
            .extract("Jane Doe\njane@example.com\n9876543210\nhttps://www.linkedin.com/in/janedoe");

        assert_eq!(record.value(FieldName::Name).cloned(), text("Jane Doe"));
        assert_eq!(record.value(FieldName::Email).cloned(), text("jane@example.com"));
        assert_eq!(record.value(FieldName::Phone).cloned(), text("9876543210"));
        assert_eq!(
            record.value(FieldName::Linkedin).cloned(),
            text("https://www.linkedin.com/in/janedoe")
        );
        for name in [FieldName::Name, FieldName::Email, FieldName::Phone, FieldName::Linkedin] {
            assert_eq!(record.confidence(name), 1);
        }
        assert_eq!(record.confidence(FieldName::Github), 0);
        assert_eq!(record.value(FieldName::Github), None);
    }

    #[test]
    fn test_full_resume() {
        let record = FieldExtractor::default().extract(SAMPLE);

        assert_eq!(
            record.value(FieldName::Skills).cloned(),
            Some(FieldValue::List(vec![
                "python".to_string(),
                "machine learning".to_string(),
                "sql".to_string(),
            ]))
        );
        assert_eq!(
            record.value(FieldName::Education).cloned(),
            Some(FieldValue::Education(vec![EducationEntry {
                degree: "B.Tech".to_string(),
                institution: "MIT".to_string(),
                year: "2018 - 2022".to_string(),
            }]))
        );
        assert_eq!(
            record.value(FieldName::Certifications).cloned(),
            Some(FieldValue::List(vec![
                "AWS Associate".to_string(),
                "Scrum Master".to_string(),
            ]))
        );
        assert_eq!(
            record.value(FieldName::Projects).cloned(),
            Some(FieldValue::Projects(vec![ProjectEntry {
                title: "Resume Parser".to_string(),
                description: "Parses PDF resumes into JSON.".to_string(),
            }]))
        );
        assert_eq!(record.value(FieldName::Experience), None);
        assert_eq!(record.missing_fields(), vec![FieldName::Experience]);
    }

    #[test]
    fn test_empty_text_all_missing() {
        let record = FieldExtractor::default().extract("");

        assert_eq!(record, ResumeRecord::new());
        assert_eq!(record.missing_fields(), FieldName::ALL.to_vec());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = FieldExtractor::default();
        assert_eq!(extractor.extract(SAMPLE), extractor.extract(SAMPLE));
    }

    #[test]
    fn test_confidence_matches_value() {
        for input in [SAMPLE, "", "   \n  ", "Certifications\n\nProjects\n : "] {
            let record = FieldExtractor::default().extract(input);
            for (_, field) in record.iter() {
                let has_value = field.value().is_some_and(|v| !v.is_empty());
                assert_eq!(field.confidence() == 1, has_value);
            }
        }
    }

    struct PanickingMatcher;

    impl FieldMatcher for PanickingMatcher {
        fn field(&self) -> FieldName {
            FieldName::Experience
        }

        fn extract(&self, _text: &str) -> Option<FieldValue> {
            panic!("matcher bug");
        }
    }

    #[test]
    fn test_panicking_matcher_is_isolated() {
        let mut extractor = FieldExtractor::with_matchers(vec![Box::new(PanickingMatcher)]);
        extractor.register(Box::new(NameMatcher));
        assert_eq!(extractor.matcher_count(), 2);

        let record = extractor.extract("Jane Doe");
        assert_eq!(record.confidence(FieldName::Experience), 0);
        assert_eq!(record.value(FieldName::Name).cloned(), text("Jane Doe"));
    }

    #[test]
    fn test_custom_skill_vocabulary() {
        let config = ExtractionConfig {
            skills: vec!["Rust".to_string(), "Go".to_string()],
        };
        let record = FieldExtractor::new(&config).extract("Python, rust");
        assert_eq!(
            record.value(FieldName::Skills).cloned(),
            Some(FieldValue::List(vec!["Rust".to_string()]))
        );
    }
}
