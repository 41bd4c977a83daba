//! Resume record: ten named fields, each with a binary confidence flag.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The closed set of fields a resume record carries, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Name,
    Email,
    Phone,
    Linkedin,
    Github,
    Skills,
    Education,
    Experience,
    Certifications,
    Projects,
}

impl FieldName {
    /// Every field, in record order.
    pub const ALL: [FieldName; 10] = [
        FieldName::Name,
        FieldName::Email,
        FieldName::Phone,
        FieldName::Linkedin,
        FieldName::Github,
        FieldName::Skills,
        FieldName::Education,
        FieldName::Experience,
        FieldName::Certifications,
        FieldName::Projects,
    ];

    /// Key used in the JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Name => "name",
            FieldName::Email => "email",
            FieldName::Phone => "phone",
            FieldName::Linkedin => "linkedin",
            FieldName::Github => "github",
            FieldName::Skills => "skills",
            FieldName::Education => "education",
            FieldName::Experience => "experience",
            FieldName::Certifications => "certifications",
            FieldName::Projects => "projects",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One education line: `<degree>, <institution>, <start>-<end>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EducationEntry {
    /// Degree as written (e.g. "B.Tech").
    pub degree: String,
    /// Institution as written.
    pub institution: String,
    /// Year range, normalized to `"YYYY - YYYY"`.
    pub year: String,
}

/// One project block from the projects section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectEntry {
    /// Title line with the trailing colon stripped.
    pub title: String,
    /// Remaining lines of the block joined with spaces.
    pub description: String,
}

/// Value of a field.
///
/// Serialized untagged, so the JSON shape is a plain string or list. The
/// entry structs reject unknown keys, which keeps deserialization of the
/// list variants unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Education(Vec<EducationEntry>),
    Projects(Vec<ProjectEntry>),
}

impl FieldValue {
    /// An empty string or an empty list counts as "nothing found".
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Education(items) => items.is_empty(),
            FieldValue::Projects(items) => items.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_education(&self) -> Option<&[EducationEntry]> {
        match self {
            FieldValue::Education(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_projects(&self) -> Option<&[ProjectEntry]> {
        match self {
            FieldValue::Projects(items) => Some(items),
            _ => None,
        }
    }
}

/// A field's value and its detection flag.
///
/// `confidence` is 1 exactly when `value` is present and non-empty; the
/// constructors and the deserializer both enforce this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawField")]
pub struct Field {
    value: Option<FieldValue>,
    confidence: u8,
}

impl Field {
    /// A field a matcher found. Empty values collapse to [`Field::missing`].
    pub fn found(value: FieldValue) -> Self {
        if value.is_empty() {
            return Self::missing();
        }
        Self {
            value: Some(value),
            confidence: 1,
        }
    }

    /// A field nothing matched.
    pub fn missing() -> Self {
        Self {
            value: None,
            confidence: 0,
        }
    }

    pub fn value(&self) -> Option<&FieldValue> {
        self.value.as_ref()
    }

    pub fn confidence(&self) -> u8 {
        self.confidence
    }

    pub fn is_found(&self) -> bool {
        self.confidence == 1
    }
}

#[derive(Deserialize)]
struct RawField {
    value: Option<FieldValue>,
    confidence: u8,
}

impl TryFrom<RawField> for Field {
    type Error = String;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        let has_value = raw.value.as_ref().is_some_and(|v| !v.is_empty());
        match (raw.confidence, has_value) {
            (1, true) | (0, false) => Ok(Self {
                value: raw.value.filter(|v| !v.is_empty()),
                confidence: raw.confidence,
            }),
            (1, false) => Err("confidence 1 requires a non-empty value".to_string()),
            (0, true) => Err("confidence 0 requires a null value".to_string()),
            (c, _) => Err(format!("confidence must be 0 or 1, got {c}")),
        }
    }
}

/// The complete extraction output: every [`FieldName`] mapped to a [`Field`].
///
/// Keys keep insertion order, which is [`FieldName::ALL`] order for records
/// built by [`ResumeRecord::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResumeRecord {
    fields: IndexMap<FieldName, Field>,
}

impl ResumeRecord {
    /// A record with all ten fields missing.
    pub fn new() -> Self {
        Self {
            fields: FieldName::ALL
                .iter()
                .map(|name| (*name, Field::missing()))
                .collect(),
        }
    }

    pub fn get(&self, name: FieldName) -> Option<&Field> {
        self.fields.get(&name)
    }

    /// Value of a field, if found.
    pub fn value(&self, name: FieldName) -> Option<&FieldValue> {
        self.get(name).and_then(Field::value)
    }

    pub fn confidence(&self, name: FieldName) -> u8 {
        self.get(name).map(Field::confidence).unwrap_or(0)
    }

    pub(crate) fn set(&mut self, name: FieldName, field: Field) {
        self.fields.insert(name, field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &Field)> {
        self.fields.iter().map(|(name, field)| (*name, field))
    }

    /// Names of fields with confidence 0.
    pub fn missing_fields(&self) -> Vec<FieldName> {
        self.iter()
            .filter(|(_, field)| !field.is_found())
            .map(|(name, _)| name)
            .collect()
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for ResumeRecord {
    fn default() -> Self {
        Self::new()
    }
}
