//! Batch titling.
//!
//! Documents are processed strictly one after another. A failure is
//! reported and recorded, then the next document runs; the batch always
//! finishes with a summary message.

use tracing::{info, warn};

use super::titler::{failure_message, Titler};
use crate::error::{Result, TitleError};
use crate::traits::{host::DocumentHost, oracle::TitleOracle};
use crate::types::{document::DocumentRef, outcome::BatchReport};

impl<H: DocumentHost, O: TitleOracle> Titler<H, O> {
    /// Title each document in order.
    ///
    /// Configuration errors (no API key) abort before anything runs, since
    /// every document would fail the same way.
    pub async fn title_all(&self, docs: &[DocumentRef]) -> Result<BatchReport> {
        if let Err(e) = self.settings().require_api_key() {
            self.host().notify(&format!("Batch not started: {}", e));
            return Err(e);
        }

        let mut report = BatchReport::new(docs.len());
        for (index, doc) in docs.iter().enumerate() {
            info!(
                document = %doc,
                index = index + 1,
                total = docs.len(),
                "Titling document"
            );
            self.host()
                .notify(&format!("Titling {}/{}: {}", index + 1, docs.len(), doc.name));

            match self.title_document(doc).await {
                Ok(outcome) => report.record(&outcome),
                Err(e) => {
                    warn!(document = %doc, error = %e, "Document failed, continuing batch");
                    self.host().notify(&failure_message(doc, &e));
                    report.record_failure(doc.clone(), &e);
                }
            }
        }

        info!(
            total = report.total,
            renamed = report.renamed,
            unchanged = report.unchanged,
            failed = report.failed(),
            "Batch complete"
        );
        self.host().notify(&report.message());
        Ok(report)
    }

    /// Title every document the host has open.
    pub async fn title_open_documents(&self) -> Result<BatchReport> {
        let docs = self.host().list_open().await.map_err(TitleError::List)?;
        self.title_all(&docs).await
    }

    /// Title every open document that still has an "Untitled" name.
    pub async fn title_untitled(&self) -> Result<BatchReport> {
        let docs: Vec<DocumentRef> = self
            .host()
            .list_open()
            .await
            .map_err(TitleError::List)?
            .into_iter()
            .filter(DocumentRef::is_untitled)
            .collect();
        self.title_all(&docs).await
    }
}
