use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::files::handlers;
use crate::features::files::services::FileService;

/// Create routes for the files feature
pub fn routes(service: Arc<FileService>) -> Router {
    Router::new()
        .route("/download/{filename}", get(handlers::download_file))
        .with_state(service)
}
