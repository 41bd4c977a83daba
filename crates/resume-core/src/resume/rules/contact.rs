//! Identity and contact fields: name, email, phone, profile links.

use regex::Regex;

use super::patterns::{EMAIL, GITHUB_URL, LINKEDIN_URL, PHONE};
use crate::models::record::{FieldName, FieldValue};
use crate::resume::FieldMatcher;

/// Name: the first non-blank line.
pub struct NameMatcher;

impl FieldMatcher for NameMatcher {
    fn field(&self) -> FieldName {
        FieldName::Name
    }

    fn extract(&self, text: &str) -> Option<FieldValue> {
        extract_name(text).map(FieldValue::Text)
    }
}

/// First-match extractor for a single-valued pattern field.
pub struct PatternMatcher {
    field: FieldName,
    pattern: &'static Regex,
}

impl PatternMatcher {
    fn new(field: FieldName, pattern: &'static Regex) -> Self {
        Self { field, pattern }
    }

    pub fn email() -> Self {
        Self::new(FieldName::Email, &EMAIL)
    }

    pub fn phone() -> Self {
        Self::new(FieldName::Phone, &PHONE)
    }

    pub fn linkedin() -> Self {
        Self::new(FieldName::Linkedin, &LINKEDIN_URL)
    }

    pub fn github() -> Self {
        Self::new(FieldName::Github, &GITHUB_URL)
    }
}

impl FieldMatcher for PatternMatcher {
    fn field(&self) -> FieldName {
        self.field
    }

    fn extract(&self, text: &str) -> Option<FieldValue> {
        first_match(self.pattern, text).map(FieldValue::Text)
    }
}

fn first_match(pattern: &Regex, text: &str) -> Option<String> {
    pattern.find(text).map(|m| m.as_str().to_string())
}

/// Extract the candidate name from text.
pub fn extract_name(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Extract the first email address from text.
pub fn extract_email(text: &str) -> Option<String> {
    first_match(&EMAIL, text)
}

/// Extract the first ten-digit phone number from text.
pub fn extract_phone(text: &str) -> Option<String> {
    first_match(&PHONE, text)
}

/// Extract the first LinkedIn profile URL from text.
pub fn extract_linkedin(text: &str) -> Option<String> {
    first_match(&LINKEDIN_URL, text)
}

/// Extract the first GitHub URL from text.
pub fn extract_github(text: &str) -> Option<String> {
    first_match(&GITHUB_URL, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_name_skips_blank_lines() {
        assert_eq!(extract_name("\n   \n  Jane Doe  \nEngineer"), Some("Jane Doe".to_string()));
        assert_eq!(extract_name(" \n\t\n"), None);
        assert_eq!(extract_name(""), None);
    }

    #[test]
    fn test_extract_email() {
        let text = "Contact: jane.doe@example.com or jd@work.co.uk";
        assert_eq!(extract_email(text), Some("jane.doe@example.com".to_string()));
        assert_eq!(extract_email("no at sign here"), None);
        assert_eq!(extract_email("broken@host"), None);
    }

    #[test]
    fn test_extract_phone_exactly_ten_digits() {
        assert_eq!(extract_phone("Phone: 9876543210"), Some("9876543210".to_string()));
        assert_eq!(extract_phone("ID 12345678901"), None);
        assert_eq!(extract_phone("Call 987654321"), None);
        assert_eq!(extract_phone("tel:9876543210,"), Some("9876543210".to_string()));
    }

    #[test]
    fn test_extract_profile_links() {
        let text = "https://www.linkedin.com/in/jane-doe https://github.com/janedoe/parser";
        assert_eq!(
            extract_linkedin(text),
            Some("https://www.linkedin.com/in/jane-doe".to_string())
        );
        assert_eq!(extract_github(text), Some("https://github.com/janedoe/parser".to_string()));

        assert_eq!(
            extract_linkedin("http://linkedin.com/in/jd"),
            Some("http://linkedin.com/in/jd".to_string())
        );
        assert_eq!(extract_linkedin("https://www.linkedin.com/company/acme"), None);
        assert_eq!(extract_github("github.com/janedoe"), None);
    }

    #[test]
    fn test_pattern_matcher_fields() {
        assert_eq!(PatternMatcher::email().field(), FieldName::Email);
        assert_eq!(PatternMatcher::phone().field(), FieldName::Phone);
        assert_eq!(PatternMatcher::linkedin().field(), FieldName::Linkedin);
        assert_eq!(PatternMatcher::github().field(), FieldName::Github);
        assert_eq!(
            PatternMatcher::phone().extract("9876543210"),
            Some(FieldValue::Text("9876543210".to_string()))
        );
    }
}
