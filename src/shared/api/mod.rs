pub mod json_config;
pub mod response;
pub mod revision;

pub use response::ApiResponse;
