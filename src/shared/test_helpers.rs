#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use axum::Router;
#[cfg(test)]
use axum_test::TestServer;
#[cfg(test)]
use sqlx::sqlite::SqlitePoolOptions;

#[cfg(test)]
use crate::core::config::StorageConfig;
#[cfg(test)]
use crate::features::files::{routes as files_routes, FileService};
#[cfg(test)]
use crate::features::requests::{routes as requests_routes, RequestService};
#[cfg(test)]
use crate::modules::storage::FileStore;

/// Spin up the full router against an in-memory database and a
/// throwaway upload directory. The TempDir guard must be kept alive for
/// the duration of the test.
#[cfg(test)]
pub async fn spawn_test_app() -> (TestServer, tempfile::TempDir) {
    // A single connection keeps every query on the same in-memory database
    let pool = SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    let upload_dir = tempfile::tempdir().expect("failed to create temp upload dir");
    let file_store = Arc::new(FileStore::new(&StorageConfig {
        upload_dir: upload_dir.path().to_string_lossy().into_owned(),
    }));
    file_store
        .ensure_root_exists()
        .await
        .expect("failed to create upload dir");

    let request_service = Arc::new(RequestService::new(pool.clone(), Arc::clone(&file_store)));
    let file_service = Arc::new(FileService::new(Arc::clone(&file_store)));

    let app = Router::new()
        .merge(requests_routes::routes(request_service))
        .merge(files_routes::routes(file_service));

    let server = TestServer::new(app).expect("failed to start test server");
    (server, upload_dir)
}
