//! Titling pipeline.
//!
//! The pipeline orchestrates:
//! - Context extraction (see [`crate::summarize`])
//! - Title request building (prompt + response schema)
//! - Oracle response validation
//! - Sanitizing and applying the title
//! - Sequential batches with per-document failure isolation

pub mod apply;
pub mod batch;
pub mod prompts;
pub mod response;
pub mod titler;

pub use apply::{apply_title, sanitize_title};
pub use prompts::{
    format_title_prompt, title_schema, TitleRequest, TitleResponse, MAX_TITLE_WORDS, TITLE_PROMPT,
};
pub use response::{parse_title_response, strip_code_blocks};
pub use titler::Titler;
