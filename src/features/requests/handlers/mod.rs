pub mod request_handler;

pub use request_handler::{
    __path_create_request, __path_list_requests, __path_modify_request, create_request,
    list_requests, modify_request,
};
