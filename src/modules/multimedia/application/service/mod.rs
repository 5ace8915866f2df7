mod fetch_upload_service;
mod upload_image_service;

pub use fetch_upload_service::{is_safe_file_name, FetchUploadService};
pub use upload_image_service::UploadImageService;
