use utoipa::{Modify, OpenApi};

use crate::features::files::handlers as files_handlers;
use crate::features::requests::{dtos as requests_dtos, handlers as requests_handlers};
use crate::features::requests::models::RequestStatus;
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Requests
        requests_handlers::create_request,
        requests_handlers::list_requests,
        requests_handlers::modify_request,
        // Files
        files_handlers::download_file,
    ),
    components(
        schemas(
            RequestStatus,
            requests_dtos::CreateRequestDto,
            requests_dtos::RequestResponseDto,
            requests_dtos::ModifyRequestDto,
            ApiResponse<requests_dtos::RequestResponseDto>,
        )
    ),
    tags(
        (name = "requests", description = "Lab request tracking"),
        (name = "files", description = "Stored file downloads"),
    )
)]
pub struct ApiDoc;

/// Overrides the generated OpenAPI info block with configured values
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
