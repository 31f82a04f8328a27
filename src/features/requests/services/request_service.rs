use std::sync::Arc;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::core::error::{AppError, Result};
use crate::features::requests::dtos::{CreateRequestDto, RequestResponseDto};
use crate::features::requests::models::{LabRequest, RequestStatus};
use crate::modules::storage::{FileKind, FileStore};

const REQUEST_COLUMNS: &str =
    "id, name, details, status, fastq_file_path, report_path, created_at";

/// A file payload received from a multipart upload
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Service for managing lab requests
pub struct RequestService {
    pool: SqlitePool,
    file_store: Arc<FileStore>,
}

impl RequestService {
    pub fn new(pool: SqlitePool, file_store: Arc<FileStore>) -> Self {
        Self { pool, file_store }
    }

    /// Create a new request in the `pending` state with no files attached
    pub async fn create(&self, dto: CreateRequestDto) -> Result<RequestResponseDto> {
        let sql = format!(
            "INSERT INTO lab_requests (name, details, status, created_at) \
             VALUES (?1, ?2, ?3, ?4) RETURNING {REQUEST_COLUMNS}"
        );
        let request = sqlx::query_as::<_, LabRequest>(&sql)
            .bind(&dto.name)
            .bind(&dto.details)
            .bind(RequestStatus::Pending)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create request: {:?}", e);
                AppError::Database(e)
            })?;

        info!("Request created: id={}, name={:?}", request.id, request.name);

        Ok(request.into())
    }

    /// List all requests in insertion order
    pub async fn list(&self) -> Result<Vec<RequestResponseDto>> {
        let sql = format!("SELECT {REQUEST_COLUMNS} FROM lab_requests ORDER BY id");
        let requests = sqlx::query_as::<_, LabRequest>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(requests.into_iter().map(Into::into).collect())
    }

    /// Attach uploaded files to an existing request and advance its status.
    ///
    /// Blobs are written first, then the record; a blob that was already
    /// persisted is not removed if a later step fails. Status is
    /// recomputed from the union of stored and newly uploaded paths, so a
    /// request that has a report stays `done` even on a fastq-only
    /// re-upload. With no files this is a no-op that re-reads the record.
    pub async fn update_with_files(
        &self,
        request_id: i64,
        fastq_file: Option<UploadedFile>,
        report_file: Option<UploadedFile>,
    ) -> Result<RequestResponseDto> {
        let existing = self.find(request_id).await?;

        let mut fastq_file_path = existing.fastq_file_path;
        let mut report_path = existing.report_path;

        if let Some(file) = fastq_file {
            fastq_file_path = Some(self.store_blob(request_id, FileKind::Fastq, &file).await?);
        }

        if let Some(file) = report_file {
            report_path = Some(self.store_blob(request_id, FileKind::Report, &file).await?);
        }

        let status = RequestStatus::derive(fastq_file_path.is_some(), report_path.is_some());

        sqlx::query(
            "UPDATE lab_requests SET fastq_file_path = ?1, report_path = ?2, status = ?3 \
             WHERE id = ?4",
        )
        .bind(&fastq_file_path)
        .bind(&report_path)
        .bind(status)
        .bind(request_id)
        .execute(&self.pool)
        .await?;

        info!("Request updated: id={}, status={:?}", request_id, status);

        // Return the record as committed
        let updated = self.find(request_id).await?;
        Ok(updated.into())
    }

    async fn store_blob(
        &self,
        request_id: i64,
        kind: FileKind,
        file: &UploadedFile,
    ) -> Result<String> {
        let filename = FileStore::sanitize_filename(&file.filename)?;
        let key = self.file_store.key_for(request_id, kind, filename);
        self.file_store.save(&key, &file.data).await
    }

    async fn find(&self, request_id: i64) -> Result<LabRequest> {
        let sql = format!("SELECT {REQUEST_COLUMNS} FROM lab_requests WHERE id = ?1");
        sqlx::query_as::<_, LabRequest>(&sql)
            .bind(request_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Request not found".to_string()))
    }
}
