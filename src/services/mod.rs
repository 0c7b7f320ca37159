//! Service layer for platform capabilities.
//!
//! This module contains the small capability interfaces the core depends on,
//! together with their platform-backed implementations.

pub mod storage;

// Re-export commonly used types
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
