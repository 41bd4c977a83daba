//! Projects section, split into titled blocks.

use super::patterns::{PROJECT_TITLE, PROJECTS_HEADER_LINE, PROJECTS_HEADER_WORD};
use super::sections::{SectionMarkers, section_body};
use crate::models::record::{FieldName, FieldValue, ProjectEntry};
use crate::resume::FieldMatcher;

pub struct ProjectsMatcher;

impl FieldMatcher for ProjectsMatcher {
    fn field(&self) -> FieldName {
        FieldName::Projects
    }

    fn extract(&self, text: &str) -> Option<FieldValue> {
        let projects = extract_projects(text);
        (!projects.is_empty()).then_some(FieldValue::Projects(projects))
    }
}

/// Projects listed after the Projects header, through end of text.
///
/// The first line after the header always opens a block; later blocks open
/// at title-like lines. Blocks with a blank title are dropped.
pub fn extract_projects(text: &str) -> Vec<ProjectEntry> {
    let markers = SectionMarkers {
        header_line: &PROJECTS_HEADER_LINE,
        header_word: &PROJECTS_HEADER_WORD,
        end_line: None,
        end_word: None,
    };
    let Some(body) = section_body(text, &markers) else {
        return Vec::new();
    };

    let mut blocks: Vec<Vec<&str>> = Vec::new();
    for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match blocks.last_mut() {
            Some(block) if !PROJECT_TITLE.is_match(line) => block.push(line),
            _ => blocks.push(vec![line]),
        }
    }

    blocks
        .into_iter()
        .filter_map(|block| {
            let (first, rest) = block.split_first()?;
            let title = first.trim_matches(|c| c == ':' || c == ' ');
            if title.is_empty() {
                return None;
            }
            Some(ProjectEntry {
                title: title.to_string(),
                description: rest.join(" "),
            })
        })
        .collect()
}
