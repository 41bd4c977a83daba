//! Data models for resume extraction.

pub mod config;
pub mod record;
