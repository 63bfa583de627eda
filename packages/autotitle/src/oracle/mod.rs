//! Title oracle implementations.
//!
//! Reference implementations of the [`TitleOracle`](crate::traits::oracle::TitleOracle)
//! trait. Applications can use these directly or implement their own.

mod openai;

pub use openai::{OpenAiOracle, DEFAULT_BASE_URL};
