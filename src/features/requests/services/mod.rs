mod request_service;

pub use request_service::{RequestService, UploadedFile};
