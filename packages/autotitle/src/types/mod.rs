//! Data types shared across the library.

pub mod config;
pub mod document;
pub mod outcome;
pub mod sentence;
pub mod summary;
