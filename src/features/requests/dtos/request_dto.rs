use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::requests::models::RequestStatus;

/// Maximum uploaded file size in bytes (50MB; sequencing files are large)
pub const MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

/// Request DTO for creating a lab request
///
/// Empty strings are accepted; only shape and an upper length bound are
/// enforced.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRequestDto {
    /// Name of the request (e.g. the sample label)
    #[validate(length(max = 255, message = "Name must not exceed 255 characters"))]
    pub name: String,

    /// Free-form request details
    #[validate(length(max = 5000, message = "Details must not exceed 5000 characters"))]
    pub details: String,
}

/// Multipart form for attaching files to a request.
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ModifyRequestDto {
    /// Sequencing data file (optional)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub fastq_file: Option<String>,
    /// Report file (optional)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub report_file: Option<String>,
}

/// Response DTO for a lab request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequestResponseDto {
    /// Storage-assigned identifier
    pub id: i64,
    pub name: String,
    pub details: String,
    /// Lifecycle stage: pending, file_uploaded, or done
    pub status: RequestStatus,
    /// Path of the stored sequencing file, once uploaded
    pub fastq_file_path: Option<String>,
    /// Path of the stored report file, once uploaded
    pub report_path: Option<String>,
    pub created_at: DateTime<Utc>,
}
