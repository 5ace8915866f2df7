use actix_web::{get, http::header, web, HttpResponse, Responder};
use tracing::error;

use crate::multimedia::application::ports::incoming::use_cases::FetchUploadError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Serves files kept by the local upload storage. Names are immutable UUIDs, so responses
/// are cached for a year. The CSP keeps an uploaded SVG from running script on this origin.
#[get("/uploads/{name}")]
pub async fn serve_upload_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let name = path.into_inner();

    match data.multimedia.fetch_upload.execute(&name).await {
        Ok(asset) => HttpResponse::Ok()
            .content_type(asset.content_type)
            .insert_header((header::CACHE_CONTROL, "public, max-age=31536000, immutable"))
            .insert_header(("X-Content-Type-Options", "nosniff"))
            .insert_header((header::CONTENT_SECURITY_POLICY, "default-src 'none'; sandbox"))
            .body(asset.bytes),

        Err(FetchUploadError::InvalidName) | Err(FetchUploadError::NotFound) => {
            ApiResponse::not_found("FILE_NOT_FOUND", "File not found")
        }

        Err(FetchUploadError::StorageFailed(e)) => {
            error!(file = %name, error = %e, "Serving upload failed");
            ApiResponse::internal_error()
        }
    }
}
