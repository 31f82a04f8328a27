use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::files::services::FileService;

/// Download a stored file by name
///
/// Returns the raw bytes with the given filename as the suggested
/// download name.
#[utoipa::path(
    get,
    path = "/download/{filename}",
    params(
        ("filename" = String, Path, description = "Name of the stored file")
    ),
    responses(
        (status = 200, description = "Raw file bytes", content_type = "application/octet-stream"),
        (status = 400, description = "Invalid filename"),
        (status = 404, description = "File not found")
    ),
    tag = "files"
)]
pub async fn download_file(
    State(service): State<Arc<FileService>>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let bytes = service.download(&filename).await?;

    let headers = [
        (
            header::CONTENT_TYPE,
            "application/octet-stream".to_string(),
        ),
        (header::CONTENT_DISPOSITION, attachment_disposition(&filename)),
    ];

    Ok((headers, bytes).into_response())
}

/// Build a Content-Disposition value that is always a valid header.
///
/// Quotes and backslashes are escaped; names with bytes outside the
/// printable ASCII range are served without a suggested filename rather
/// than producing an unbuildable header value.
fn attachment_disposition(filename: &str) -> String {
    if !filename.bytes().all(|b| (0x20..=0x7e).contains(&b)) {
        return "attachment".to_string();
    }

    let escaped = filename.replace('\\', "\\\\").replace('"', "\\\"");
    format!("attachment; filename=\"{}\"", escaped)
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderValue, StatusCode};

    use super::attachment_disposition;
    use axum_test::multipart::{MultipartForm, Part};
    use serde_json::json;

    use crate::features::requests::dtos::RequestResponseDto;
    use crate::shared::test_helpers::spawn_test_app;

    #[tokio::test]
    async fn uploaded_bytes_download_identically() {
        let (server, _upload_dir) = spawn_test_app().await;

        let created = server
            .post("/request")
            .json(&json!({ "name": "Sample A", "details": "rush order" }))
            .await
            .json::<RequestResponseDto>();

        let payload: &[u8] = b"@read1\nACGTACGT\n+\nIIIIIIII\n";
        server
            .put(&format!("/modify-request/{}", created.id))
            .multipart(
                MultipartForm::new().add_part(
                    "fastq_file",
                    Part::bytes(payload)
                        .file_name("reads.fastq")
                        .mime_type("application/octet-stream"),
                ),
            )
            .await;

        let response = server
            .get(&format!("/download/{}_fastq_reads.fastq", created.id))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.as_bytes().as_ref(), payload);

        let disposition = response
            .headers()
            .get("content-disposition")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        assert!(disposition.contains(&format!("{}_fastq_reads.fastq", created.id)));
    }

    #[test]
    fn disposition_quotes_plain_filenames() {
        assert_eq!(
            attachment_disposition("reads.fastq"),
            "attachment; filename=\"reads.fastq\""
        );
    }

    #[test]
    fn disposition_escapes_quotes_and_backslashes() {
        assert_eq!(
            attachment_disposition("we\"ird.fastq"),
            "attachment; filename=\"we\\\"ird.fastq\""
        );
        assert_eq!(
            attachment_disposition("back\\slash.txt"),
            "attachment; filename=\"back\\\\slash.txt\""
        );
    }

    #[test]
    fn disposition_is_always_a_valid_header_value() {
        for name in ["reads.fastq", "we\"ird.fastq", "prøve.fastq", "报告.pdf"] {
            assert!(HeaderValue::from_str(&attachment_disposition(name)).is_ok());
        }
        // Non-ASCII names drop the suggested filename instead of breaking
        assert_eq!(attachment_disposition("prøve.fastq"), "attachment");
    }

    #[tokio::test]
    async fn downloading_unknown_filename_is_not_found() {
        let (server, _upload_dir) = spawn_test_app().await;

        let response = server.get("/download/never_uploaded.fastq").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }
}
