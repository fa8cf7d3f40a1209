//! Extractor boundary
//!
//! The vision model that reads the bill photo is external. This module owns
//! the two things we hand it and take back: the prompt, and parsing of its
//! reply into [`RawBillFields`]. Model replies often include markdown fences
//! or chatter around the JSON payload.

use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};
use crate::models::RawBillFields;

/// Prompt to send along with the bill image
pub const EXTRACTION_PROMPT: &str = include_str!("../../../prompts/extract_bill.md");

/// Prompt with optional user-supplied context appended
pub fn extraction_prompt(context: Option<&str>) -> String {
    match context.map(str::trim).filter(|c| !c.is_empty()) {
        Some(context) => format!("{}\nAdditional context from the user: {}\n", EXTRACTION_PROMPT, context),
        None => EXTRACTION_PROMPT.to_string(),
    }
}

/// Parse an extractor reply into raw bill fields
pub fn parse_extraction_response(response: &str) -> Result<RawBillFields> {
    let text = strip_code_fences(response);

    if let Ok(value) = serde_json::from_str::<Value>(&text) {
        if let Some(fields) = fields_from_value(value) {
            return Ok(fields);
        }
    }

    if let Some(json_str) = outermost(&text, '{', '}') {
        if let Ok(value) = serde_json::from_str::<Value>(json_str) {
            warn!("Extractor reply had text around the JSON object");
            if let Some(fields) = fields_from_value(value) {
                return Ok(fields);
            }
        }
    }

    if let Some(json_str) = outermost(&text, '[', ']') {
        if let Ok(value) = serde_json::from_str::<Value>(json_str) {
            warn!("Extractor reply was a JSON array, using its first object");
            if let Some(fields) = fields_from_value(value) {
                return Ok(fields);
            }
        }
    }

    Err(Error::InvalidData(format!(
        "No JSON object found in extractor response | Raw: {}",
        truncate(response.trim(), 200)
    )))
}

fn strip_code_fences(response: &str) -> String {
    let leading = Regex::new(r"(?i)^```(?:json)?").expect("valid regex");
    let trailing = Regex::new(r"```$").expect("valid regex");

    let text = response.trim();
    let text = leading.replace(text, "");
    let text = trailing.replace(text.trim(), "");
    text.trim().to_string()
}

/// Slice from the first `open` to the last `close`, inclusive
fn outermost(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (start < end).then(|| &text[start..=end])
}

/// Objects map directly; arrays yield their first object
fn fields_from_value(value: Value) -> Option<RawBillFields> {
    match value {
        Value::Object(object) => Some(RawBillFields::from_object(&object)),
        Value::Array(items) => items.iter().find_map(|item| match item {
            Value::Object(object) => Some(RawBillFields::from_object(object)),
            _ => None,
        }),
        _ => None,
    }
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
