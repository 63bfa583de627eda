//! Core trait abstractions for the titling library.
//!
//! Applications implement these to plug in their document store and their
//! language-model provider.

pub mod host;
pub mod oracle;
