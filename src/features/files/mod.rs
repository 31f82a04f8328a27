//! Stored file download feature.
//!
//! Serves blobs out of the file store by name. Filenames are sanitized
//! before any path is built, so lookups cannot escape the upload
//! directory.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/download/{filename}` | Download a stored file |

pub mod handlers;
pub mod routes;
pub mod services;

pub use services::FileService;
