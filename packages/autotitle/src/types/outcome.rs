//! Outcomes of titling one document or a batch.

use serde::Serialize;

use super::document::DocumentRef;

/// What happened to a document that was titled without error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum TitleOutcome {
    /// The document was renamed
    Renamed { from: String, to: String },

    /// The suggested title equals the current name; nothing to do
    Unchanged { name: String },

    /// The suggested title was empty after sanitization; nothing to do
    EmptyTitle,

    /// Auto-update skipped the document (toggle off or not untitled)
    Skipped,
}

impl TitleOutcome {
    pub fn is_renamed(&self) -> bool {
        matches!(self, Self::Renamed { .. })
    }

    /// Short status line for the user.
    pub fn message(&self) -> String {
        match self {
            Self::Renamed { from, to } => format!("Renamed \"{}\" to \"{}\"", from, to),
            Self::Unchanged { name } => format!("\"{}\" already has this title", name),
            Self::EmptyTitle => "The suggested title was empty; name left unchanged".to_string(),
            Self::Skipped => "Skipped".to_string(),
        }
    }
}

/// A document that failed inside a batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub document: DocumentRef,
    pub error: String,
}

/// Summary of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub renamed: usize,
    pub unchanged: usize,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// Tally one successful outcome.
    pub fn record(&mut self, outcome: &TitleOutcome) {
        if outcome.is_renamed() {
            self.renamed += 1;
        } else {
            self.unchanged += 1;
        }
    }

    /// Record one failed document.
    pub fn record_failure(&mut self, document: DocumentRef, error: impl ToString) {
        self.failures.push(BatchFailure {
            document,
            error: error.to_string(),
        });
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Final status line.
    pub fn message(&self) -> String {
        let mut message = format!("Titled {} of {} notes", self.renamed, self.total);
        if self.unchanged > 0 {
            message.push_str(&format!(", {} unchanged", self.unchanged));
        }
        if !self.failures.is_empty() {
            message.push_str(&format!(", {} failed", self.failures.len()));
        }
        message
    }
}
