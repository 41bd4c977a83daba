//! Skills matching against a closed vocabulary.

use regex::Regex;
use tracing::warn;

use crate::models::config::ExtractionConfig;
use crate::models::record::{FieldName, FieldValue};
use crate::resume::FieldMatcher;

/// Finds every vocabulary skill mentioned as a whole token.
pub struct SkillsMatcher {
    vocabulary: Vec<(String, Regex)>,
}

impl SkillsMatcher {
    /// Build a matcher for the given vocabulary.
    ///
    /// Entries are deduplicated case-insensitively; the first spelling wins.
    pub fn new<S: AsRef<str>>(vocabulary: &[S]) -> Self {
        let mut compiled: Vec<(String, Regex)> = Vec::with_capacity(vocabulary.len());

        for skill in vocabulary {
            let skill = skill.as_ref().trim();
            if skill.is_empty() {
                continue;
            }
            if compiled.iter().any(|(s, _)| s.eq_ignore_ascii_case(skill)) {
                continue;
            }
            match skill_pattern(skill) {
                Ok(re) => compiled.push((skill.to_string(), re)),
                Err(e) => warn!("Skipping skill {:?}: {}", skill, e),
            }
        }

        Self { vocabulary: compiled }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.skills.as_slice())
    }

    /// Number of distinct skills in the vocabulary.
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Skills found in text, in vocabulary order.
    pub fn find_all(&self, text: &str) -> Vec<String> {
        self.vocabulary
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(skill, _)| skill.clone())
            .collect()
    }
}

impl FieldMatcher for SkillsMatcher {
    fn field(&self) -> FieldName {
        FieldName::Skills
    }

    fn extract(&self, text: &str) -> Option<FieldValue> {
        let found = self.find_all(text);
        (!found.is_empty()).then_some(FieldValue::List(found))
    }
}

// Token boundaries are explicit so skills ending in symbols ("c++") still match.
fn skill_pattern(skill: &str) -> Result<Regex, regex::Error> {
    let words: Vec<String> = skill.split_whitespace().map(regex::escape).collect();
    Regex::new(&format!(r"(?i)(?:^|[^\w])(?:{})(?:[^\w]|$)", words.join(r"\s+")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::DEFAULT_SKILLS;
    use pretty_assertions::assert_eq;

    fn default_matcher() -> SkillsMatcher {
        SkillsMatcher::new(DEFAULT_SKILLS)
    }

    #[test]
    fn test_vocabulary_words_only() {
        let skills = default_matcher().find_all("Python, Java, cooking");
        assert_eq!(skills, vec!["python".to_string(), "java".to_string()]);
    }

    #[test]
    fn test_whole_token_matching() {
        let matcher = default_matcher();
        assert_eq!(matcher.find_all("JavaScript developer"), vec!["javascript".to_string()]);
        assert!(matcher.find_all("pythonic code, sqlite").is_empty());
        assert_eq!(matcher.find_all("Languages: C++ and SQL."), vec!["c++", "sql"]);
    }

    #[test]
    fn test_multi_word_skills_span_whitespace() {
        let skills = default_matcher().find_all("Strong in Machine\nLearning and data  analysis");
        assert_eq!(skills, vec!["machine learning", "data analysis"]);
    }

    #[test]
    fn test_reported_in_vocabulary_order_once() {
        let skills = default_matcher().find_all("sql SQL html python Python");
        assert_eq!(skills, vec!["python", "sql", "html"]);
    }

    #[test]
    fn test_vocabulary_deduplicated() {
        let matcher = SkillsMatcher::new(&["Rust", "rust", "  ", "Go"]);
        assert_eq!(matcher.len(), 2);
        assert_eq!(matcher.find_all("rust and go"), vec!["Rust", "Go"]);
    }

    #[test]
    fn test_no_skills_is_none() {
        assert_eq!(default_matcher().extract("gardening"), None);
        assert!(SkillsMatcher::new::<&str>(&[]).is_empty());
    }
}
