//! Resume field extraction module.

mod extractor;
pub mod rules;

pub use extractor::FieldExtractor;

use crate::models::record::{FieldName, FieldValue};

/// One independent extraction rule.
///
/// A matcher looks at the whole text stream and either finds its field or
/// does not; it never sees other fields' results.
pub trait FieldMatcher {
    /// The field this matcher fills.
    fn field(&self) -> FieldName;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<FieldValue>;
}
