use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::features::requests::dtos::MAX_FILE_SIZE;
use crate::features::requests::handlers;
use crate::features::requests::services::RequestService;

/// Create routes for the requests feature
pub fn routes(service: Arc<RequestService>) -> Router {
    Router::new()
        .route("/request", post(handlers::create_request))
        .route("/get-request", get(handlers::list_requests))
        .route(
            "/modify-request/{request_id}",
            // Allow body size up to two files plus multipart overhead
            put(handlers::modify_request)
                .layer(DefaultBodyLimit::max(2 * MAX_FILE_SIZE + 1024 * 1024)),
        )
        .with_state(service)
}
