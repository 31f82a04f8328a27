pub mod file_handler;

pub use file_handler::{__path_download_file, download_file};
