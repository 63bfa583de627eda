//! Filesystem document host: a directory of markdown notes.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{HostError, HostResult};
use crate::traits::host::DocumentHost;
use crate::types::document::DocumentRef;

/// Default note extension.
pub const NOTE_EXTENSION: &str = "md";

type Notifier = Box<dyn Fn(&str) + Send + Sync>;

/// Notes stored as files in one directory.
///
/// A document's id is its path and its name is the file stem. Renames stay
/// in the same directory, keep the extension and never overwrite another
/// note.
pub struct FsHost {
    root: PathBuf,
    extension: String,
    notifier: Option<Notifier>,
}

impl FsHost {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: NOTE_EXTENSION.to_string(),
            notifier: None,
        }
    }

    /// Use a different note extension (without the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Route user notifications somewhere other than the log.
    pub fn with_notifier(mut self, notifier: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reference to the note at `path`.
    ///
    /// Relative paths are resolved against the root.
    pub fn document(&self, path: impl AsRef<Path>) -> HostResult<DocumentRef> {
        let path = path.as_ref();
        let path = if path.is_relative() && !path.exists() {
            self.root.join(path)
        } else {
            path.to_path_buf()
        };

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| HostError::InvalidName(path.display().to_string()))?;
        Ok(DocumentRef::new(path.to_string_lossy(), name))
    }

    /// Reference to the note called `name` in the root directory.
    pub fn document_named(&self, name: &str) -> HostResult<DocumentRef> {
        validate_name(name)?;
        let path = self.note_path(&self.root, name);
        Ok(DocumentRef::new(path.to_string_lossy(), name))
    }

    fn note_path(&self, dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}.{}", name, self.extension))
    }

    fn is_note(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }
}

fn validate_name(name: &str) -> HostResult<()> {
    if name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control)
    {
        return Err(HostError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Whether `dir` holds an entry named exactly like `path`'s file name.
async fn has_entry(dir: &Path, path: &Path) -> HostResult<bool> {
    let Some(file_name) = path.file_name() else {
        return Ok(false);
    };
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_name() == file_name {
            return Ok(true);
        }
    }
    Ok(false)
}

fn not_found(path: &Path, e: std::io::Error) -> HostError {
    if e.kind() == std::io::ErrorKind::NotFound {
        HostError::NotFound(path.display().to_string())
    } else {
        HostError::Io(e)
    }
}

#[async_trait]
impl DocumentHost for FsHost {
    async fn read(&self, doc: &DocumentRef) -> HostResult<String> {
        let path = Path::new(&doc.id);
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| not_found(path, e))
    }

    async fn rename(&self, doc: &DocumentRef, new_name: &str) -> HostResult<DocumentRef> {
        validate_name(new_name)?;

        let from = PathBuf::from(&doc.id);
        let dir = match from.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let to = self.note_path(dir, new_name);

        // Case-insensitive filesystems report the target of a case-only
        // rename as existing, so look for an exact entry instead.
        let case_only = from != to
            && from.to_string_lossy().to_lowercase() == to.to_string_lossy().to_lowercase();
        let taken = if case_only {
            has_entry(dir, &to).await?
        } else {
            tokio::fs::try_exists(&to).await?
        };
        if taken {
            return Err(HostError::AlreadyExists(new_name.to_string()));
        }

        tokio::fs::rename(&from, &to)
            .await
            .map_err(|e| not_found(&from, e))?;
        debug!(from = %from.display(), to = %to.display(), "Renamed note file");

        Ok(DocumentRef::new(to.to_string_lossy(), new_name))
    }

    async fn list_open(&self) -> HostResult<Vec<DocumentRef>> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| not_found(&self.root, e))?;

        let mut docs = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !entry.file_type().await?.is_file() || !self.is_note(&path) {
                continue;
            }
            if let Ok(doc) = self.document(&path) {
                docs.push(doc);
            }
        }

        docs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(docs)
    }

    fn notify(&self, message: &str) {
        match &self.notifier {
            Some(notifier) => notifier(message),
            None => info!(target: "autotitle::notify", "{}", message),
        }
    }
}
