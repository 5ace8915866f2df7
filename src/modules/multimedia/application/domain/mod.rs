pub mod policies;

pub use policies::{UploadPolicy, UploadRejection};
