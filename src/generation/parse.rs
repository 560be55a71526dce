//! Validation of raw provider output into typed cards.
//!
//! Provider text is untrusted. It is cleaned of Markdown code fences, parsed as
//! an untyped JSON value, and only then checked field by field into `Card`s.
//! Any deviation rejects the whole response; there is no partial acceptance and
//! no attempt to repair broken JSON.

use crate::error::GenerationError;
use crate::types::Card;
use serde_json::{Map, Value};
use thiserror::Error;

/// Why a response was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseRejection {
    #[error("response is not valid JSON: {0}")]
    Malformed(String),

    #[error("expected a JSON array, found {0}")]
    NotAnArray(&'static str),

    #[error("element {index} is {found}, expected an object")]
    NotAnObject { index: usize, found: &'static str },

    #[error("element {index} has no \"{field}\" member")]
    MissingField { index: usize, field: &'static str },

    #[error("element {index} member \"{field}\" is {found}, expected a string")]
    NotAString {
        index: usize,
        field: &'static str,
        found: &'static str,
    },

    #[error("element {index} member \"{field}\" is an empty string")]
    EmptyField { index: usize, field: &'static str },
}

impl From<ResponseRejection> for GenerationError {
    fn from(rejection: ResponseRejection) -> Self {
        match rejection {
            ResponseRejection::Malformed(cause) => GenerationError::MalformedResponse(cause),
            other => GenerationError::InvalidFormat(other.to_string()),
        }
    }
}

const FENCE: &str = "```";

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Remove a surrounding triple-backtick fence, with or without a language tag.
///
/// Text without a fence is returned trimmed and otherwise untouched.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };
    let body = rest.trim_start_matches(is_tag_char);
    let body = body.trim_end();
    let body = body.strip_suffix(FENCE).unwrap_or(body);
    body.trim()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn take_text(
    object: &mut Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<String, ResponseRejection> {
    match object.remove(field) {
        None => Err(ResponseRejection::MissingField { index, field }),
        Some(Value::String(text)) if text.is_empty() => {
            Err(ResponseRejection::EmptyField { index, field })
        }
        Some(Value::String(text)) => Ok(text),
        Some(other) => Err(ResponseRejection::NotAString {
            index,
            field,
            found: json_kind(&other),
        }),
    }
}

/// Check an untyped JSON value against the card array shape.
pub fn validate_cards(value: Value) -> Result<Vec<Card>, ResponseRejection> {
    let items = match value {
        Value::Array(items) => items,
        other => return Err(ResponseRejection::NotAnArray(json_kind(&other))),
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let mut object = match item {
                Value::Object(object) => object,
                other => {
                    return Err(ResponseRejection::NotAnObject {
                        index,
                        found: json_kind(&other),
                    })
                }
            };
            let front = take_text(&mut object, index, "front")?;
            let back = take_text(&mut object, index, "back")?;
            Ok(Card { front, back })
        })
        .collect()
}

/// Strip, parse and validate a raw provider response.
pub fn parse_response(raw: &str) -> Result<Vec<Card>, ResponseRejection> {
    let cleaned = strip_code_fences(raw);
    let value: Value =
        serde_json::from_str(cleaned).map_err(|e| ResponseRejection::Malformed(e.to_string()))?;
    validate_cards(value)
}
