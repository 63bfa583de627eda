//! Document host implementations.

pub mod fs;
pub mod memory;

pub use fs::{FsHost, NOTE_EXTENSION};
pub use memory::MemoryHost;
