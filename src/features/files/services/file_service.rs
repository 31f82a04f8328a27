use std::sync::Arc;

use crate::core::error::Result;
use crate::modules::storage::FileStore;

/// Service for serving stored files
pub struct FileService {
    file_store: Arc<FileStore>,
}

impl FileService {
    pub fn new(file_store: Arc<FileStore>) -> Self {
        Self { file_store }
    }

    /// Fetch the raw bytes of a stored file by name.
    ///
    /// The name is matched directly against the file store; there is no
    /// ownership check against any request record.
    pub async fn download(&self, filename: &str) -> Result<Vec<u8>> {
        let filename = FileStore::sanitize_filename(filename)?;
        self.file_store.read(filename).await
    }
}
