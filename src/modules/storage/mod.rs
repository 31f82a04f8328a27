//! Storage module for file management
//!
//! Provides the local-disk file store where uploaded blobs are
//! persisted and served from.

mod file_store;

pub use file_store::{FileKind, FileStore};
