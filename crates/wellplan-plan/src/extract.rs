use serde_json::Value;
use thiserror::Error;

/// Failure to find a JSON value in backend text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("response is empty")]
    Empty,
    #[error("response contains no braced object")]
    NoObject,
    #[error("braced object is not valid json: {0}")]
    Malformed(String),
}

/// Pull a JSON value out of text that may be wrapped in prose or code fences.
///
/// The whole text is tried first. Otherwise the span from the first `{` to the
/// last `}` is parsed. Nothing else is attempted; there is no repair.
pub fn extract_json(raw: &str) -> Result<Value, ExtractError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ExtractError::Empty);
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) else {
        return Err(ExtractError::NoObject);
    };
    if end < start {
        return Err(ExtractError::NoObject);
    }

    serde_json::from_str(&trimmed[start..=end]).map_err(|err| ExtractError::Malformed(err.to_string()))
}
