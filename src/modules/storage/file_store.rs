//! Local-disk blob store
//!
//! Uploaded files live in a single flat directory, keyed by a
//! deterministic `{request_id}_{kind}_{filename}` convention so a
//! re-upload for the same request overwrites the previous blob.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::config::StorageConfig;
use crate::core::error::{AppError, Result};

/// Which slot of a request an uploaded file fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Fastq,
    Report,
}

impl FileKind {
    fn as_str(&self) -> &'static str {
        match self {
            FileKind::Fastq => "fastq",
            FileKind::Report => "report",
        }
    }
}

/// Local-disk file store rooted at the configured upload directory
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root: PathBuf::from(&config.upload_dir),
        }
    }

    /// Create the upload directory if it doesn't exist
    pub async fn ensure_root_exists(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Storage key for an uploaded request file: `{id}_{kind}_{filename}`
    pub fn key_for(&self, request_id: i64, kind: FileKind, filename: &str) -> String {
        format!("{}_{}_{}", request_id, kind.as_str(), filename)
    }

    /// Reject filenames that could escape the upload directory.
    ///
    /// Uploaded filenames and download lookups both pass through here:
    /// empty names, absolute paths, path separators, and `..` segments
    /// are refused before any path is built.
    pub fn sanitize_filename(filename: &str) -> Result<&str> {
        if filename.is_empty() {
            return Err(AppError::BadRequest("Filename must not be empty".to_string()));
        }
        if filename.contains('/') || filename.contains('\\') {
            return Err(AppError::BadRequest(
                "Filename must not contain path separators".to_string(),
            ));
        }
        if filename == "." || filename == ".." {
            return Err(AppError::BadRequest(
                "Filename must not be a directory segment".to_string(),
            ));
        }
        Ok(filename)
    }

    /// Persist a blob under the given key, overwriting any existing file.
    /// Returns the path string stored on the owning record.
    pub async fn save(&self, key: &str, data: &[u8]) -> Result<String> {
        let path = self.root.join(key);
        tokio::fs::write(&path, data).await?;
        debug!("Stored blob: {} ({} bytes)", path.display(), data.len());
        Ok(path.to_string_lossy().into_owned())
    }

    /// Read a blob back by key. NotFound when no such file exists.
    pub async fn read(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.root.join(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound("File not found".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
