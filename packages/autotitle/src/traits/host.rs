//! Document host trait.
//!
//! The host owns the documents: it reads them, renames them, knows which
//! ones are open, and shows status messages to the user. The titling
//! pipeline only ever talks to documents through this trait.

use async_trait::async_trait;

use crate::error::HostResult;
use crate::types::document::DocumentRef;

/// Capabilities the titling pipeline needs from its environment.
#[async_trait]
pub trait DocumentHost: Send + Sync {
    /// Read the full text of a document.
    async fn read(&self, doc: &DocumentRef) -> HostResult<String>;

    /// Rename a document within its current location.
    ///
    /// Returns the reference to the renamed document.
    async fn rename(&self, doc: &DocumentRef, new_name: &str) -> HostResult<DocumentRef>;

    /// Documents currently open (or, for hosts without a notion of open
    /// documents, all documents), in a stable order.
    async fn list_open(&self) -> HostResult<Vec<DocumentRef>>;

    /// Show a short status message to the user.
    fn notify(&self, message: &str);
}
