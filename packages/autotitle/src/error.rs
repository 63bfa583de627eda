//! Typed errors for the titling library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell
//! configuration problems, empty input, oracle failures and rename failures
//! apart and report each one differently.

use thiserror::Error;

/// Errors that can occur while titling a document.
#[derive(Debug, Error)]
pub enum TitleError {
    /// No API key configured for the title oracle
    #[error("API key is not configured")]
    MissingApiKey,

    /// Settings failed validation
    #[error("invalid settings: {reason}")]
    InvalidSettings { reason: String },

    /// Document has no usable text
    #[error("document is empty: {name}")]
    EmptyDocument { name: String },

    /// Title oracle failed or returned an unusable response
    #[error("title oracle failed: {0}")]
    Oracle(#[from] OracleError),

    /// Reading the document from the host failed
    #[error("failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: HostError,
    },

    /// The host rejected the rename
    #[error("failed to rename {from} to {to}: {source}")]
    Rename {
        from: String,
        to: String,
        #[source]
        source: HostError,
    },

    /// Enumerating documents failed
    #[error("failed to list documents: {0}")]
    List(#[source] HostError),
}

/// Failures of the title oracle.
///
/// All of these are non-fatal: the current document is skipped and the
/// failure is reported to the user.
#[derive(Debug, Error)]
pub enum OracleError {
    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// API error (non-2xx response, rate limit, invalid request)
    #[error("API error: {0}")]
    Api(String),

    /// The oracle returned nothing
    #[error("empty response")]
    MissingResponse,

    /// The response was not valid JSON
    #[error("malformed JSON response: {0}")]
    MalformedJson(String),

    /// The JSON payload has no `title` field
    #[error("response is missing the title field")]
    MissingTitle,

    /// The `title` field is not a string
    #[error("title field is not a string")]
    NonStringTitle,
}

/// Errors reported by a document host.
#[derive(Debug, Error)]
pub enum HostError {
    /// Document does not exist
    #[error("document not found: {0}")]
    NotFound(String),

    /// A document with the target name already exists
    #[error("a document named {0} already exists")]
    AlreadyExists(String),

    /// The host does not accept the name
    #[error("invalid document name: {0}")]
    InvalidName(String),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for titling operations.
pub type Result<T> = std::result::Result<T, TitleError>;

/// Result type alias for oracle operations.
pub type OracleResult<T> = std::result::Result<T, OracleError>;

/// Result type alias for host operations.
pub type HostResult<T> = std::result::Result<T, HostError>;
