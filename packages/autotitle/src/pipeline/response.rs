//! Parsing and validation of oracle responses.

use crate::error::{OracleError, OracleResult};

/// Strip markdown code fences some models wrap around JSON.
pub fn strip_code_blocks(response: &str) -> &str {
    response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Pull the `title` string out of a raw oracle payload.
///
/// Blank payloads, invalid JSON, a missing `title` and a non-string
/// `title` are each reported as a distinct [`OracleError`].
pub fn parse_title_response(raw: &str) -> OracleResult<String> {
    let body = strip_code_blocks(raw);
    if body.is_empty() {
        return Err(OracleError::MissingResponse);
    }

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| OracleError::MalformedJson(e.to_string()))?;

    match value.get("title") {
        None | Some(serde_json::Value::Null) => Err(OracleError::MissingTitle),
        Some(serde_json::Value::String(title)) => Ok(title.clone()),
        Some(_) => Err(OracleError::NonStringTitle),
    }
}
