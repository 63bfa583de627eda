//! Title prompt and response contract for the title oracle.

use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

/// Upper bound on title length requested from the oracle.
pub const MAX_TITLE_WORDS: usize = 10;

/// Prompt asking for a short title of the extracted context.
pub const TITLE_PROMPT: &str = r#"Create a concise, descriptive title for a note.

Rules:
- At most {max_words} words
- Capture the main topic of the note
- No quotes, no trailing punctuation, no markdown
- Use the language of the note

Respond with JSON: {"title": "..."}

Key sentences from the note:
{context}"#;

/// Shape of the oracle's answer.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TitleResponse {
    /// The generated title
    pub title: String,
}

/// A prompt plus the JSON schema the response must follow.
#[derive(Debug, Clone, Serialize)]
pub struct TitleRequest {
    pub prompt: String,
    pub schema: serde_json::Value,
}

impl TitleRequest {
    /// Build the request for a piece of extracted context.
    pub fn new(context: &str) -> Self {
        Self {
            prompt: format_title_prompt(context),
            schema: title_schema(),
        }
    }
}

/// Format the title prompt.
pub fn format_title_prompt(context: &str) -> String {
    TITLE_PROMPT
        .replace("{max_words}", &MAX_TITLE_WORDS.to_string())
        .replace("{context}", context)
}

/// Strict-mode JSON schema for [`TitleResponse`].
///
/// Strict structured output requires `additionalProperties: false` and
/// every property listed in `required`; the `$schema` marker is dropped.
pub fn title_schema() -> serde_json::Value {
    let mut value = serde_json::to_value(schema_for!(TitleResponse)).unwrap_or_default();
    close_objects(&mut value);
    if let serde_json::Value::Object(map) = &mut value {
        map.remove("$schema");
        map.remove("definitions");
    }
    value
}

/// Add `additionalProperties: false` and require every property, recursively.
fn close_objects(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if map.get("type").and_then(|t| t.as_str()) == Some("object") {
                map.insert(
                    "additionalProperties".to_string(),
                    serde_json::Value::Bool(false),
                );
                if let Some(serde_json::Value::Object(props)) = map.get("properties") {
                    let keys = props
                        .keys()
                        .map(|k| serde_json::Value::String(k.clone()))
                        .collect();
                    map.insert("required".to_string(), serde_json::Value::Array(keys));
                }
            }
            for (_, nested) in map.iter_mut() {
                close_objects(nested);
            }
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(close_objects),
        _ => {}
    }
}
