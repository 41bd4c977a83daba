//! Common regex patterns for resume extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Contact details
    pub static ref EMAIL: Regex = Regex::new(
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"
    ).unwrap();

    pub static ref PHONE: Regex = Regex::new(
        r"\b[0-9]{10}\b"
    ).unwrap();

    pub static ref LINKEDIN_URL: Regex = Regex::new(
        r"https?://(?:www\.)?linkedin\.com/in/\S+"
    ).unwrap();

    pub static ref GITHUB_URL: Regex = Regex::new(
        r"https?://(?:www\.)?github\.com/\S+"
    ).unwrap();

    // Education: "<degree>, <institution>, 2018-2022" (hyphen, en or em dash)
    pub static ref EDUCATION_LINE: Regex = Regex::new(
        r"(.+?),\s*(.+?),\s*(\d{4})\s*[-–—]\s*(\d{4})"
    ).unwrap();

    // Section headers on a line of their own
    pub static ref CERTIFICATIONS_HEADER_LINE: Regex = Regex::new(
        r"(?im)^[ \t]*certifications[ \t]*:?[ \t\r]*$"
    ).unwrap();

    pub static ref PROJECTS_HEADER_LINE: Regex = Regex::new(
        r"(?im)^[ \t]*projects[ \t]*:?[ \t\r]*$"
    ).unwrap();

    // A line that opens with the next header, with or without inline content
    pub static ref CERTIFICATIONS_END_LINE: Regex = Regex::new(
        r"(?im)^[ \t]*(?:projects|skills)\b"
    ).unwrap();

    // Section headers anywhere in flat text (OCR output has no line breaks)
    pub static ref CERTIFICATIONS_HEADER_WORD: Regex = Regex::new(
        r"(?i)\bcertifications\b[ \t]*:?"
    ).unwrap();

    pub static ref PROJECTS_HEADER_WORD: Regex = Regex::new(
        r"(?i)\bprojects\b[ \t]*:?"
    ).unwrap();

    pub static ref CERTIFICATIONS_END_WORD: Regex = Regex::new(
        r"(?i)\b(?:projects|skills)\b"
    ).unwrap();

    // Project block title: capitalized, 4-100 chars, ending in a colon
    pub static ref PROJECT_TITLE: Regex = Regex::new(
        r"^[A-Z].{3,99}:$"
    ).unwrap();
}
