//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the titling library
//! without making real LLM or network calls. See [`crate::hosts::MemoryHost`]
//! for an in-memory document host.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::error::{OracleError, OracleResult};
use crate::pipeline::prompts::TitleRequest;
use crate::traits::oracle::TitleOracle;

/// A mock title oracle for testing.
///
/// Replies with queued responses in order. Once the queue runs dry every
/// call fails with [`OracleError::MissingResponse`].
#[derive(Default, Clone)]
pub struct MockOracle {
    /// Queued raw responses
    responses: Arc<RwLock<VecDeque<OracleResult<String>>>>,

    /// Prompts received, for assertions
    prompts: Arc<RwLock<Vec<String>>>,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a well-formed reply carrying `title`.
    pub fn with_title(self, title: impl Into<String>) -> Self {
        let body = serde_json::json!({ "title": title.into() }).to_string();
        self.with_raw(body)
    }

    /// Queue a raw reply, used verbatim.
    pub fn with_raw(self, raw: impl Into<String>) -> Self {
        self.responses.write().unwrap().push_back(Ok(raw.into()));
        self
    }

    /// Queue a failure.
    pub fn with_error(self, error: OracleError) -> Self {
        self.responses.write().unwrap().push_back(Err(error));
        self
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }

    /// Responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.responses.read().unwrap().len()
    }
}

#[async_trait]
impl TitleOracle for MockOracle {
    async fn complete(&self, request: &TitleRequest) -> OracleResult<String> {
        self.prompts.write().unwrap().push(request.prompt.clone());
        self.responses
            .write()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(OracleError::MissingResponse))
    }
}
