mod serve_upload;
mod upload_image;

pub use serve_upload::serve_upload_handler;
pub use upload_image::{__path_upload_image_handler, upload_image_handler, UploadImageResponse};
