//! Credential handling.

pub mod api_key;

pub use api_key::ApiKey;
