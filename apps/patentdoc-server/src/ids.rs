//! Identifier extraction from free-form input
//!
//! Users paste whole share links; the spreadsheet or document id is the first
//! run of 25 or more word characters and hyphens.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ConvertError;

lazy_static! {
    static ref RESOURCE_ID_PATTERN: Regex = Regex::new(r"[-\w]{25,}").unwrap();
}

pub fn extract_id(input: &str) -> Option<&str> {
    RESOURCE_ID_PATTERN.find(input).map(|m| m.as_str())
}

/// Like `extract_id`, but a missing id is an invalid request naming `what`.
pub fn require_id(input: &str, what: &str) -> Result<String, ConvertError> {
    extract_id(input)
        .map(str::to_string)
        .ok_or_else(|| ConvertError::InvalidRequest(format!("No {} id found in '{}'", what, input)))
}
