//! In-memory document host for testing and embedding.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::error::{HostError, HostResult};
use crate::traits::host::DocumentHost;
use crate::types::document::DocumentRef;

/// Documents keyed by name, held in memory.
///
/// Clones share the same documents, so a test can keep a handle while the
/// titler owns another. Records every notification and rename for
/// assertions.
#[derive(Clone, Default)]
pub struct MemoryHost {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    documents: BTreeMap<String, String>,
    notifications: Vec<String>,
    renames: Vec<(String, String)>,
}

impl MemoryHost {
    /// Create a new empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document.
    pub fn with_document(self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    /// Add or replace a document.
    pub fn insert(&self, name: impl Into<String>, text: impl Into<String>) {
        self.state
            .write()
            .unwrap()
            .documents
            .insert(name.into(), text.into());
    }

    /// Reference to a document by name.
    pub fn document(&self, name: &str) -> Option<DocumentRef> {
        self.state
            .read()
            .unwrap()
            .documents
            .contains_key(name)
            .then(|| DocumentRef::new(name, name))
    }

    /// All documents in name order.
    pub fn list(&self) -> Vec<DocumentRef> {
        self.state
            .read()
            .unwrap()
            .documents
            .keys()
            .map(|name| DocumentRef::new(name.as_str(), name.as_str()))
            .collect()
    }

    /// Text of a document.
    pub fn text(&self, name: &str) -> Option<String> {
        self.state.read().unwrap().documents.get(name).cloned()
    }

    /// Messages passed to `notify`, oldest first.
    pub fn notifications(&self) -> Vec<String> {
        self.state.read().unwrap().notifications.clone()
    }

    /// `(from, to)` pairs of successful renames.
    pub fn renames(&self) -> Vec<(String, String)> {
        self.state.read().unwrap().renames.clone()
    }
}

#[async_trait]
impl DocumentHost for MemoryHost {
    async fn read(&self, doc: &DocumentRef) -> HostResult<String> {
        self.text(&doc.id)
            .ok_or_else(|| HostError::NotFound(doc.id.clone()))
    }

    async fn rename(&self, doc: &DocumentRef, new_name: &str) -> HostResult<DocumentRef> {
        if new_name.trim().is_empty() {
            return Err(HostError::InvalidName(new_name.to_string()));
        }

        let mut state = self.state.write().unwrap();
        if state.documents.contains_key(new_name) {
            return Err(HostError::AlreadyExists(new_name.to_string()));
        }
        let text = state
            .documents
            .remove(&doc.id)
            .ok_or_else(|| HostError::NotFound(doc.id.clone()))?;
        state.documents.insert(new_name.to_string(), text);
        state
            .renames
            .push((doc.name.clone(), new_name.to_string()));

        Ok(DocumentRef::new(new_name, new_name))
    }

    async fn list_open(&self) -> HostResult<Vec<DocumentRef>> {
        Ok(self.list())
    }

    fn notify(&self, message: &str) {
        self.state
            .write()
            .unwrap()
            .notifications
            .push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_and_rename() {
        let host = MemoryHost::new().with_document("Untitled", "Body text here.");
        let doc = host.document("Untitled").unwrap();

        assert_eq!(host.read(&doc).await.unwrap(), "Body text here.");

        let renamed = host.rename(&doc, "Body").await.unwrap();
        assert_eq!(renamed.name, "Body");
        assert!(host.document("Untitled").is_none());
        assert!(matches!(host.read(&doc).await, Err(HostError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_rename_refuses_existing_name() {
        let host = MemoryHost::new()
            .with_document("a", "one")
            .with_document("b", "two");
        let doc = host.document("a").unwrap();

        let err = host.rename(&doc, "b").await.unwrap_err();
        assert!(matches!(err, HostError::AlreadyExists(_)));
        assert_eq!(host.text("b").unwrap(), "two");
    }

    #[test]
    fn test_clones_share_state() {
        let host = MemoryHost::new();
        let handle = host.clone();
        host.insert("note", "text");
        host.notify("hello");

        let open = tokio_test::block_on(handle.list_open()).unwrap();
        assert_eq!(open, vec![DocumentRef::new("note", "note")]);
        assert_eq!(handle.notifications(), vec!["hello".to_string()]);
    }
}
