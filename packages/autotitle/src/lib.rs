//! Automatic Note Titling Library
//!
//! Generates short titles for free-text notes. A TextRank summarizer picks
//! the most central sentences of a note, a language model turns them into a
//! title, and the note is renamed in its host.
//!
//! # Design Philosophy
//!
//! **"Send the gist, not the note"**
//!
//! - Extractive summarization runs locally and deterministically
//! - Only a few key sentences (or a short prefix) reach the model
//! - Structured output keeps the model's answer machine-checkable
//! - One failing note never stops a batch
//!
//! # Usage
//!
//! ```rust,ignore
//! use autotitle::{FsHost, OpenAiOracle, Settings, Titler};
//!
//! let settings = Settings::new("sk-...").with_sentence_count(5);
//! let oracle = OpenAiOracle::from_settings(&settings)?;
//! let titler = Titler::new(FsHost::new("vault"), oracle, settings)?;
//!
//! // One note
//! let doc = titler.host().document_named("Untitled")?;
//! let outcome = titler.title_document(&doc).await?;
//!
//! // Every note still called "Untitled ..."
//! let report = titler.title_untitled().await?;
//! ```
//!
//! The summarizer is usable on its own:
//!
//! ```rust,ignore
//! use autotitle::{Summarizer, SummarizerConfig};
//!
//! let summarizer = Summarizer::new(SummarizerConfig::new().with_sentence_count(3))?;
//! let summary = summarizer.summarize(text);
//! println!("{}", summary.joined());
//! ```
//!
//! # Modules
//!
//! - [`summarize`] - Sentence parsing, similarity graph, TextRank, context extraction
//! - [`pipeline`] - Title request building, response validation, renaming, batches
//! - [`traits`] - Core trait abstractions (DocumentHost, TitleOracle)
//! - [`types`] - Settings, sentences, summaries and outcomes
//! - [`hosts`] - Document hosts (FsHost, MemoryHost)
//! - [`security`] - API key handling
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod hosts;
pub mod pipeline;
pub mod security;
pub mod summarize;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "openai")]
pub mod oracle;

// Re-export core types at crate root
pub use error::{HostError, OracleError, TitleError};
pub use hosts::{FsHost, MemoryHost};
pub use pipeline::{sanitize_title, TitleRequest, Titler};
pub use security::ApiKey;
pub use summarize::{extract_context, Summarizer};
pub use traits::{host::DocumentHost, oracle::TitleOracle};
pub use types::{
    config::{OutputOrder, SelectionStrategy, Settings, SummarizerConfig},
    document::DocumentRef,
    outcome::{BatchFailure, BatchReport, TitleOutcome},
    sentence::Sentence,
    summary::{ContextSource, Extraction, RankedSentence, Summary},
};

#[cfg(feature = "openai")]
pub use oracle::OpenAiOracle;
