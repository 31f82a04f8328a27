mod lab_request;

pub use lab_request::{LabRequest, RequestStatus};
