// src/api/schemas.rs
use serde::Serialize;
use utoipa::ToSchema;

/// Standard success response wrapper
#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct SuccessResponse<T> {
    /// Always true for successful responses
    #[schema(example = true)]
    pub success: bool,
    /// Response data
    pub data: T,
}

/// Success without a payload (saves and removals)
#[derive(Serialize, ToSchema)]
pub struct OkResponse {
    #[schema(example = true)]
    pub success: bool,
}

/// Standard error response
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always false for error responses
    #[schema(example = false)]
    pub success: bool,

    /// Error code for programmatic handling
    #[schema(example = "REVISION_CONFLICT")]
    pub code: String,

    /// Human-readable error message
    #[schema(example = "The portfolio was changed by someone else")]
    pub error: String,
}
