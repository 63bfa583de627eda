//! Title oracle trait.

use async_trait::async_trait;

use crate::error::OracleResult;
use crate::pipeline::prompts::TitleRequest;

/// A generative text service that answers a title request.
///
/// Implementations wrap a specific LLM provider and own their transport
/// concerns (timeouts, HTTP client settings). The pipeline never retries.
#[async_trait]
pub trait TitleOracle: Send + Sync {
    /// Send the prompt and schema, returning the raw response payload.
    ///
    /// The payload is expected to be JSON matching the request schema;
    /// validation happens in the pipeline.
    async fn complete(&self, request: &TitleRequest) -> OracleResult<String>;
}
