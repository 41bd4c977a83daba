//! Section location in a flat text stream.

use regex::Regex;

/// How a section header is recognized.
pub struct SectionMarkers<'a> {
    /// Header alone on its line.
    pub header_line: &'a Regex,
    /// Header anywhere, used when no standalone line exists.
    pub header_word: &'a Regex,
    /// Headers that close the section, at the start of a line.
    pub end_line: Option<&'a Regex>,
    /// Headers that close the section, anywhere.
    pub end_word: Option<&'a Regex>,
}

/// Return the section body that follows the header.
///
/// A standalone header line takes precedence and is closed by the first
/// line that starts with an end header. An inline header is closed by the next inline
/// end word. Without an end marker the section runs to end of text.
pub fn section_body<'t>(text: &'t str, markers: &SectionMarkers<'_>) -> Option<&'t str> {
    let (start, end_marker) = match markers.header_line.find(text) {
        Some(m) => (m.end(), markers.end_line),
        None => (markers.header_word.find(text)?.end(), markers.end_word),
    };

    let rest = &text[start..];
    let end = end_marker
        .and_then(|re| re.find(rest))
        .map_or(rest.len(), |m| m.start());

    Some(&rest[..end])
}
