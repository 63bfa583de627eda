//! Configuration types for summarization and titling.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TitleError};
use crate::security::ApiKey;

/// Default chat model used by the title oracle.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default number of sentences extracted per document.
pub const DEFAULT_SENTENCE_COUNT: usize = 5;

/// Order in which selected sentences are returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputOrder {
    /// Highest score first
    ByRank,

    /// Original document order, so the context reads as a narrative
    #[default]
    ByOccurrence,
}

/// How sentences are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionStrategy {
    /// Graph ranking over sentence similarity
    #[default]
    TextRank,

    /// First K qualifying sentences by position, no ranking
    LeadSentences,
}

/// Configuration for the summarization engine.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    /// Number of sentences to select (K).
    pub sentence_count: usize,

    /// Damping factor `d` in `(1-d) + d * Σ ...`.
    ///
    /// Default: 0.85.
    pub damping: f64,

    /// Stop once the largest per-sentence score change in a pass is
    /// below this value.
    ///
    /// Default: 1e-6.
    pub convergence_threshold: f64,

    /// Hard cap on ranking passes.
    ///
    /// Default: 100.
    pub max_iterations: usize,

    /// Output ordering of the selection.
    pub order: OutputOrder,

    /// Selection strategy.
    pub strategy: SelectionStrategy,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            sentence_count: DEFAULT_SENTENCE_COUNT,
            damping: 0.85,
            convergence_threshold: 1e-6,
            max_iterations: 100,
            order: OutputOrder::default(),
            strategy: SelectionStrategy::default(),
        }
    }
}

impl SummarizerConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of sentences to select.
    pub fn with_sentence_count(mut self, count: usize) -> Self {
        self.sentence_count = count;
        self
    }

    /// Set the damping factor.
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the convergence threshold.
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Set the output order.
    pub fn with_order(mut self, order: OutputOrder) -> Self {
        self.order = order;
        self
    }

    /// Set the selection strategy.
    pub fn with_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.sentence_count == 0 {
            return Err(invalid("sentence count must be greater than zero"));
        }
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(invalid("damping must be strictly between 0 and 1"));
        }
        if !(self.convergence_threshold > 0.0) {
            return Err(invalid("convergence threshold must be positive"));
        }
        if self.max_iterations == 0 {
            return Err(invalid("iteration cap must be at least 1"));
        }
        Ok(())
    }
}

/// User settings, persisted by the host as a key-value record.
///
/// Field names match the persisted JSON (`apiKey`, `modelId`,
/// `numberOfSentences`, `autoUpdateUntitledNotes`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub api_key: ApiKey,
    pub model_id: String,
    pub number_of_sentences: usize,
    pub auto_update_untitled_notes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: ApiKey::default(),
            model_id: DEFAULT_MODEL.to_string(),
            number_of_sentences: DEFAULT_SENTENCE_COUNT,
            auto_update_untitled_notes: false,
        }
    }
}

impl Settings {
    /// Create settings with the given API key and defaults elsewhere.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: ApiKey::new(api_key),
            ..Default::default()
        }
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model_id = model.into();
        self
    }

    /// Set the number of sentences.
    pub fn with_sentence_count(mut self, count: usize) -> Self {
        self.number_of_sentences = count;
        self
    }

    /// Enable or disable auto-titling of untitled documents.
    pub fn with_auto_update(mut self, enabled: bool) -> Self {
        self.auto_update_untitled_notes = enabled;
        self
    }

    /// Fail with [`TitleError::MissingApiKey`] when no key is set.
    pub fn require_api_key(&self) -> Result<&ApiKey> {
        if self.api_key.is_blank() {
            return Err(TitleError::MissingApiKey);
        }
        Ok(&self.api_key)
    }

    /// Validate the record.
    pub fn validate(&self) -> Result<()> {
        if self.number_of_sentences == 0 {
            return Err(invalid("numberOfSentences must be greater than zero"));
        }
        if self.model_id.trim().is_empty() {
            return Err(invalid("modelId must not be empty"));
        }
        Ok(())
    }

    /// Engine configuration derived from these settings.
    pub fn summarizer_config(&self) -> SummarizerConfig {
        SummarizerConfig::default().with_sentence_count(self.number_of_sentences)
    }
}

fn invalid(reason: &str) -> TitleError {
    TitleError::InvalidSettings {
        reason: reason.to_string(),
    }
}
