//! The Titler - main entry point for the titling library.
//!
//! Sequences one document through extraction, the title oracle and the
//! applicator:
//!
//! read → extract context → build request → oracle → parse → sanitize → rename
//!
//! Every step runs to completion before the next starts.

use tracing::{info, warn};

use super::apply::apply_title;
use super::prompts::TitleRequest;
use super::response::parse_title_response;
use crate::error::{Result, TitleError};
use crate::summarize::{extract_context, Summarizer, FALLBACK_CHARS};
use crate::traits::{host::DocumentHost, oracle::TitleOracle};
use crate::types::{
    config::{Settings, SummarizerConfig},
    document::DocumentRef,
    outcome::TitleOutcome,
    summary::Extraction,
};

/// Titles documents living in a host using a title oracle.
///
/// # Example
///
/// ```rust,ignore
/// let titler = Titler::new(FsHost::new("notes"), OpenAiOracle::new(key), settings)?;
///
/// // One document
/// let outcome = titler.title_document(&doc).await?;
///
/// // Everything the host has open, one at a time
/// let report = titler.title_open_documents().await?;
/// ```
pub struct Titler<H: DocumentHost, O: TitleOracle> {
    host: H,
    oracle: O,
    settings: Settings,
    summarizer: Summarizer,
}

impl<H: DocumentHost, O: TitleOracle> Titler<H, O> {
    /// Create a titler from user settings.
    pub fn new(host: H, oracle: O, settings: Settings) -> Result<Self> {
        settings.validate()?;
        let summarizer = Summarizer::new(settings.summarizer_config())?;
        Ok(Self {
            host,
            oracle,
            settings,
            summarizer,
        })
    }

    /// Replace the engine configuration (ordering, damping, strategy).
    pub fn with_summarizer_config(mut self, config: SummarizerConfig) -> Result<Self> {
        self.summarizer = Summarizer::new(config)?;
        Ok(self)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn summarizer(&self) -> &Summarizer {
        &self.summarizer
    }

    /// Read a document and extract its prompt context, without calling
    /// the oracle.
    pub async fn extract(&self, doc: &DocumentRef) -> Result<Extraction> {
        let text = self.read(doc).await?;
        extract_context(&self.summarizer, &doc.name, &text)
    }

    /// Ask the oracle for a title, returning it unsanitized.
    pub async fn suggest_title(&self, doc: &DocumentRef) -> Result<String> {
        self.settings.require_api_key()?;
        let text = self.read(doc).await?;
        self.suggest_for_text(doc, &text).await
    }

    /// Title one document: extract, ask the oracle, rename.
    pub async fn title_document(&self, doc: &DocumentRef) -> Result<TitleOutcome> {
        self.settings.require_api_key()?;
        let text = self.read(doc).await?;
        self.title_text(doc, &text).await
    }

    /// Title one document and report the result to the user.
    ///
    /// Errors are reported rather than returned; `None` means the document
    /// failed.
    pub async fn run(&self, doc: &DocumentRef) -> Option<TitleOutcome> {
        match self.title_document(doc).await {
            Ok(outcome) => {
                self.host.notify(&outcome.message());
                Some(outcome)
            }
            Err(e) => {
                warn!(document = %doc, error = %e, "Titling failed");
                self.host.notify(&failure_message(doc, &e));
                None
            }
        }
    }

    /// Hook for hosts that report document edits.
    ///
    /// Titles the document only when auto-update is enabled, the document
    /// still has a default "Untitled" name, and it has some text. Anything
    /// else is skipped silently.
    pub async fn on_document_modified(&self, doc: &DocumentRef) -> Result<TitleOutcome> {
        if !self.settings.auto_update_untitled_notes || !doc.is_untitled() {
            return Ok(TitleOutcome::Skipped);
        }

        let text = self.read(doc).await?;
        if text.trim().is_empty() {
            return Ok(TitleOutcome::Skipped);
        }

        self.settings.require_api_key()?;
        let outcome = self.title_text(doc, &text).await?;
        if outcome.is_renamed() {
            self.host.notify(&outcome.message());
        }
        Ok(outcome)
    }

    pub(crate) async fn title_text(&self, doc: &DocumentRef, text: &str) -> Result<TitleOutcome> {
        let suggested = self.suggest_for_text(doc, text).await?;
        apply_title(&self.host, doc, &suggested).await
    }

    async fn suggest_for_text(&self, doc: &DocumentRef, text: &str) -> Result<String> {
        let extraction = extract_context(&self.summarizer, &doc.name, text)?;
        if extraction.is_fallback() {
            self.host.notify(&format!(
                "Could not summarize \"{}\"; using its first {} characters",
                doc.name, FALLBACK_CHARS
            ));
        }

        let request = TitleRequest::new(&extraction.context);
        info!(
            document = %doc,
            context_chars = extraction.context.chars().count(),
            model = %self.settings.model_id,
            "Requesting title"
        );

        let raw = self.oracle.complete(&request).await?;
        Ok(parse_title_response(&raw)?)
    }

    async fn read(&self, doc: &DocumentRef) -> Result<String> {
        self.host.read(doc).await.map_err(|source| TitleError::Read {
            name: doc.name.clone(),
            source,
        })
    }
}

/// Status line for a failed document.
pub(crate) fn failure_message(doc: &DocumentRef, error: &TitleError) -> String {
    match error {
        TitleError::MissingApiKey => "Set an API key in the settings first".to_string(),
        TitleError::EmptyDocument { .. } => format!("\"{}\" is empty; nothing to title", doc.name),
        other => format!("Could not title \"{}\": {}", doc.name, other),
    }
}
