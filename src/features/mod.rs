pub mod files;
pub mod requests;
