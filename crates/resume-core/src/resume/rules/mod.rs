//! Field extraction rules.

pub mod certifications;
pub mod contact;
pub mod education;
pub mod patterns;
pub mod projects;
pub mod sections;
pub mod skills;

pub use certifications::{CertificationsMatcher, extract_certifications};
pub use contact::{
    NameMatcher, PatternMatcher, extract_email, extract_github, extract_linkedin, extract_name,
    extract_phone,
};
pub use education::{EducationMatcher, extract_education};
pub use projects::{ProjectsMatcher, extract_projects};
pub use skills::SkillsMatcher;
