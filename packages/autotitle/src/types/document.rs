//! Document references handed out by a host.

use serde::Serialize;
use std::fmt;

/// A reference to one document in a host.
///
/// `id` is whatever the host needs to locate the document (a path for the
/// filesystem host); `name` is the user-visible name the title replaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DocumentRef {
    pub id: String,
    pub name: String,
}

impl DocumentRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Whether the document still carries a host default name
    /// ("Untitled", "Untitled 3", ...).
    pub fn is_untitled(&self) -> bool {
        is_untitled(&self.name)
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Check whether a name is a default "Untitled" name.
pub fn is_untitled(name: &str) -> bool {
    let Some(rest) = name.trim().strip_prefix("Untitled") else {
        return false;
    };
    if rest.is_empty() {
        return true;
    }
    // Hosts number duplicates as "Untitled 2"; "Untitled2" is a real name.
    let digits = rest.trim_start();
    digits.len() < rest.len()
        && !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
}
