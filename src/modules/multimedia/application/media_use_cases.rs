use std::sync::Arc;

use crate::multimedia::application::ports::incoming::use_cases::{
    FetchUploadUseCase, UploadImageUseCase,
};

#[derive(Clone)]
pub struct MultimediaUseCases {
    pub upload_image: Arc<dyn UploadImageUseCase + Send + Sync>,
    pub fetch_upload: Arc<dyn FetchUploadUseCase + Send + Sync>,
}
