use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::features::requests::dtos::RequestResponseDto;

/// Lifecycle stage of a lab request.
///
/// Stored as TEXT; the closed enum keeps transition logic exhaustive
/// instead of comparing free-form strings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema, Default,
)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    FileUploaded,
    Done,
}

impl RequestStatus {
    /// Recompute status from which file slots are filled.
    ///
    /// A report always forces `Done`, with or without sequencing data,
    /// and a request with neither file is `Pending`. Because the inputs
    /// are the union of already-stored and newly-uploaded paths, a
    /// request never reverts to an earlier stage.
    pub fn derive(has_fastq: bool, has_report: bool) -> Self {
        match (has_fastq, has_report) {
            (_, true) => RequestStatus::Done,
            (true, false) => RequestStatus::FileUploaded,
            (false, false) => RequestStatus::Pending,
        }
    }
}

/// Database model for a lab request
#[derive(Debug, Clone, FromRow)]
pub struct LabRequest {
    pub id: i64,
    pub name: String,
    pub details: String,
    pub status: RequestStatus,
    pub fastq_file_path: Option<String>,
    pub report_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<LabRequest> for RequestResponseDto {
    fn from(r: LabRequest) -> Self {
        Self {
            id: r.id,
            name: r.name,
            details: r.details,
            status: r.status,
            fastq_file_path: r.fastq_file_path,
            report_path: r.report_path,
            created_at: r.created_at,
        }
    }
}
