use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::requests::dtos::{
    CreateRequestDto, ModifyRequestDto, RequestResponseDto, MAX_FILE_SIZE,
};
use crate::features::requests::services::{RequestService, UploadedFile};

/// Create a new lab request
///
/// The request starts in the `pending` state with no files attached.
#[utoipa::path(
    post,
    path = "/request",
    request_body = CreateRequestDto,
    responses(
        (status = 200, description = "Request created", body = RequestResponseDto),
        (status = 400, description = "Validation error")
    ),
    tag = "requests"
)]
pub async fn create_request(
    State(service): State<Arc<RequestService>>,
    AppJson(dto): AppJson<CreateRequestDto>,
) -> Result<Json<RequestResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let request = service.create(dto).await?;
    Ok(Json(request))
}

/// List all lab requests
#[utoipa::path(
    get,
    path = "/get-request",
    responses(
        (status = 200, description = "All requests in insertion order", body = Vec<RequestResponseDto>),
    ),
    tag = "requests"
)]
pub async fn list_requests(
    State(service): State<Arc<RequestService>>,
) -> Result<Json<Vec<RequestResponseDto>>> {
    let requests = service.list().await?;
    Ok(Json(requests))
}

/// Attach files to an existing lab request
///
/// Accepts multipart/form-data with optional parts:
/// - `fastq_file`: sequencing data; moves the request to `file_uploaded`
/// - `report_file`: report; moves the request to `done`
///
/// A report always forces `done`, even when both parts are sent together.
/// With neither part the record is returned unchanged.
#[utoipa::path(
    put,
    path = "/modify-request/{request_id}",
    params(
        ("request_id" = i64, Path, description = "Request identifier")
    ),
    request_body(
        content = ModifyRequestDto,
        content_type = "multipart/form-data",
        description = "Optional fastq_file and report_file parts",
    ),
    responses(
        (status = 200, description = "Updated request", body = RequestResponseDto),
        (status = 400, description = "Invalid multipart payload or filename"),
        (status = 404, description = "Request not found")
    ),
    tag = "requests"
)]
pub async fn modify_request(
    State(service): State<Arc<RequestService>>,
    Path(request_id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<RequestResponseDto>> {
    let mut fastq_file: Option<UploadedFile> = None;
    let mut report_file: Option<UploadedFile> = None;
    let mut fields_read = 0usize;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            // A form with no parts at all is reported as a parse error;
            // the update is still valid, just a no-op re-read.
            Err(e) if fields_read == 0 => {
                debug!("Treating part-less multipart body as no files: {}", e);
                break;
            }
            Err(e) => {
                debug!("Failed to read multipart field: {}", e);
                return Err(AppError::BadRequest(format!(
                    "Failed to read multipart data: {}",
                    e
                )));
            }
        };
        fields_read += 1;

        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "fastq_file" | "report_file" => {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_default();

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                if data.len() > MAX_FILE_SIZE {
                    return Err(AppError::BadRequest(format!(
                        "File exceeds maximum size of {} bytes",
                        MAX_FILE_SIZE
                    )));
                }

                let file = UploadedFile {
                    filename,
                    data: data.to_vec(),
                };

                if field_name == "fastq_file" {
                    fastq_file = Some(file);
                } else {
                    report_file = Some(file);
                }
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let request = service
        .update_with_files(request_id, fastq_file, report_file)
        .await?;
    Ok(Json(request))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use serde_json::json;

    use crate::features::requests::dtos::RequestResponseDto;
    use crate::features::requests::models::RequestStatus;
    use crate::shared::test_helpers::spawn_test_app;

    fn file_part(data: &'static [u8], filename: &str) -> Part {
        Part::bytes(data)
            .file_name(filename)
            .mime_type("application/octet-stream")
    }

    async fn create_request(
        server: &axum_test::TestServer,
        name: &str,
        details: &str,
    ) -> RequestResponseDto {
        let response = server
            .post("/request")
            .json(&json!({ "name": name, "details": details }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        response.json::<RequestResponseDto>()
    }

    #[tokio::test]
    async fn create_starts_pending_with_no_files() {
        let (server, _upload_dir) = spawn_test_app().await;

        let created = create_request(&server, "Sample A", "rush order").await;

        assert!(created.id >= 1);
        assert_eq!(created.name, "Sample A");
        assert_eq!(created.details, "rush order");
        assert_eq!(created.status, RequestStatus::Pending);
        assert_eq!(created.fastq_file_path, None);
        assert_eq!(created.report_path, None);
    }

    #[tokio::test]
    async fn list_returns_created_records_unchanged() {
        let (server, _upload_dir) = spawn_test_app().await;

        let first = create_request(&server, "Sample A", "rush order").await;
        let second = create_request(&server, "Sample B", "standard").await;

        let response = server.get("/get-request").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let listed = response.json::<Vec<RequestResponseDto>>();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[0].name, "Sample A");
        assert_eq!(listed[0].created_at, first.created_at);
        assert_eq!(listed[1].id, second.id);
    }

    #[tokio::test]
    async fn fastq_upload_moves_to_file_uploaded() {
        let (server, _upload_dir) = spawn_test_app().await;
        let created = create_request(&server, "Sample A", "rush order").await;

        let response = server
            .put(&format!("/modify-request/{}", created.id))
            .multipart(
                MultipartForm::new().add_part("fastq_file", file_part(b"@read1\nACGT\n", "reads.fastq")),
            )
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let updated = response.json::<RequestResponseDto>();
        assert_eq!(updated.status, RequestStatus::FileUploaded);
        let fastq_path = updated.fastq_file_path.expect("fastq path should be set");
        assert!(fastq_path.ends_with(&format!("{}_fastq_reads.fastq", created.id)));
        assert_eq!(updated.report_path, None);
    }

    #[tokio::test]
    async fn report_upload_moves_to_done_without_fastq() {
        let (server, _upload_dir) = spawn_test_app().await;
        let created = create_request(&server, "Sample A", "rush order").await;

        let response = server
            .put(&format!("/modify-request/{}", created.id))
            .multipart(
                MultipartForm::new().add_part("report_file", file_part(b"findings", "report.pdf")),
            )
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let updated = response.json::<RequestResponseDto>();
        assert_eq!(updated.status, RequestStatus::Done);
        assert_eq!(updated.fastq_file_path, None);
        let report_path = updated.report_path.expect("report path should be set");
        assert!(report_path.ends_with(&format!("{}_report_report.pdf", created.id)));
    }

    #[tokio::test]
    async fn report_forces_done_when_both_files_sent() {
        let (server, _upload_dir) = spawn_test_app().await;
        let created = create_request(&server, "Sample A", "rush order").await;

        let response = server
            .put(&format!("/modify-request/{}", created.id))
            .multipart(
                MultipartForm::new()
                    .add_part("fastq_file", file_part(b"ACGT", "reads.fastq"))
                    .add_part("report_file", file_part(b"findings", "report.pdf")),
            )
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let updated = response.json::<RequestResponseDto>();
        assert_eq!(updated.status, RequestStatus::Done);
        assert!(updated.fastq_file_path.is_some());
        assert!(updated.report_path.is_some());
    }

    #[tokio::test]
    async fn done_does_not_revert_on_later_fastq_upload() {
        let (server, _upload_dir) = spawn_test_app().await;
        let created = create_request(&server, "Sample A", "rush order").await;

        server
            .put(&format!("/modify-request/{}", created.id))
            .multipart(
                MultipartForm::new().add_part("report_file", file_part(b"findings", "report.pdf")),
            )
            .await;

        let response = server
            .put(&format!("/modify-request/{}", created.id))
            .multipart(
                MultipartForm::new().add_part("fastq_file", file_part(b"ACGT", "reads.fastq")),
            )
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let updated = response.json::<RequestResponseDto>();
        assert_eq!(updated.status, RequestStatus::Done);
        assert!(updated.fastq_file_path.is_some());
        assert!(updated.report_path.is_some());
    }

    #[tokio::test]
    async fn update_without_files_is_a_noop() {
        let (server, _upload_dir) = spawn_test_app().await;
        let created = create_request(&server, "Sample A", "rush order").await;

        let response = server
            .put(&format!("/modify-request/{}", created.id))
            .multipart(MultipartForm::new())
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let updated = response.json::<RequestResponseDto>();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.status, RequestStatus::Pending);
        assert_eq!(updated.fastq_file_path, None);
        assert_eq!(updated.report_path, None);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn empty_form_keeps_existing_files_and_status() {
        let (server, _upload_dir) = spawn_test_app().await;
        let created = create_request(&server, "Sample A", "rush order").await;

        server
            .put(&format!("/modify-request/{}", created.id))
            .multipart(
                MultipartForm::new().add_part("fastq_file", file_part(b"ACGT", "reads.fastq")),
            )
            .await;

        let response = server
            .put(&format!("/modify-request/{}", created.id))
            .multipart(MultipartForm::new())
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let updated = response.json::<RequestResponseDto>();
        assert_eq!(updated.status, RequestStatus::FileUploaded);
        assert!(updated.fastq_file_path.is_some());
        assert_eq!(updated.report_path, None);
    }

    #[tokio::test]
    async fn updating_unknown_request_is_not_found() {
        let (server, _upload_dir) = spawn_test_app().await;

        let response = server
            .put("/modify-request/99999")
            .multipart(
                MultipartForm::new().add_part("fastq_file", file_part(b"ACGT", "reads.fastq")),
            )
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

        // And no record was created as a side effect
        let listed = server.get("/get-request").await.json::<Vec<RequestResponseDto>>();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn traversal_filename_is_rejected() {
        let (server, _upload_dir) = spawn_test_app().await;
        let created = create_request(&server, "Sample A", "rush order").await;

        let response = server
            .put(&format!("/modify-request/{}", created.id))
            .multipart(
                MultipartForm::new()
                    .add_part("fastq_file", file_part(b"ACGT", "../evil.fastq")),
            )
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_strings_are_accepted_on_create() {
        let (server, _upload_dir) = spawn_test_app().await;

        let created = create_request(&server, "", "").await;
        assert_eq!(created.status, RequestStatus::Pending);
    }
}
