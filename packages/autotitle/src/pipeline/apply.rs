//! Title applicator: sanitize a suggested title and rename the document.

use tracing::{debug, info};

use crate::error::{Result, TitleError};
use crate::traits::host::DocumentHost;
use crate::types::{document::DocumentRef, outcome::TitleOutcome};

/// Characters that are illegal in filenames or break note links.
const ILLEGAL_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|', '#', '^', '[', ']'];

/// Make a suggested title safe to use as a document name.
///
/// Drops illegal characters and control characters, collapses newlines and
/// runs of whitespace into single spaces, and trims.
pub fn sanitize_title(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c))
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Apply a suggested title to a document.
///
/// An empty sanitized title or one equal to the current name is a no-op:
/// the host is not asked to rename.
pub async fn apply_title<H: DocumentHost + ?Sized>(
    host: &H,
    doc: &DocumentRef,
    suggested: &str,
) -> Result<TitleOutcome> {
    let title = sanitize_title(suggested);

    if title.is_empty() {
        debug!(document = %doc, suggested, "Suggested title empty after sanitizing");
        return Ok(TitleOutcome::EmptyTitle);
    }
    if title == doc.name {
        debug!(document = %doc, "Title unchanged");
        return Ok(TitleOutcome::Unchanged { name: title });
    }

    let renamed = host
        .rename(doc, &title)
        .await
        .map_err(|source| TitleError::Rename {
            from: doc.name.clone(),
            to: title.clone(),
            source,
        })?;

    info!(from = %doc.name, to = %renamed.name, "Renamed document");
    Ok(TitleOutcome::Renamed {
        from: doc.name.clone(),
        to: renamed.name,
    })
}
