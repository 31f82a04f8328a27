//! Lab request tracking feature.
//!
//! Requests move through a three-stage lifecycle driven by file uploads:
//! `pending` at creation, `file_uploaded` once sequencing data is
//! attached, `done` once a report is attached.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/request` | Create a request |
//! | GET | `/get-request` | List all requests |
//! | PUT | `/modify-request/{request_id}` | Attach files, advance status |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::RequestService;
