mod fetch_upload;
mod upload_image;

pub use fetch_upload::{FetchUploadError, FetchUploadUseCase};
pub use upload_image::{ImageUpload, UploadImageError, UploadImageUseCase, UploadedImage};
