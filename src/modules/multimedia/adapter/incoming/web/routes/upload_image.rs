use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse, Responder};
use futures::StreamExt;
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::multimedia::application::domain::UploadRejection;
use crate::multimedia::application::ports::incoming::use_cases::{ImageUpload, UploadImageError};
use crate::shared::api::ApiResponse;
use crate::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadImageResponse {
    /// Public URL of the stored image
    #[schema(example = "https://storage.googleapis.com/portfolio-assets/uploads/0195f0c2.png")]
    pub url: String,
}

fn too_large(max: u64) -> HttpResponse {
    ApiResponse::payload_too_large(
        "FILE_TOO_LARGE",
        &format!("File exceeds the {max} byte limit"),
    )
}

/// Upload an image
///
/// Multipart form with a single `file` field. The response body is bare `{ "url": ... }`
/// so the admin page can drop the URL straight into the document.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "upload",
    security(("bearer_auth" = [])),
    request_body(content_type = "multipart/form-data", description = "Form field `file`"),
    responses(
        (status = 200, description = "Stored", body = UploadImageResponse),
        (status = 400, description = "Missing file or unsupported type", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (
            status = 500,
            description = "Storage failed",
            body = ErrorResponse,
            example = json!({ "success": false, "code": "UPLOAD_FAILED", "error": "Upload failed" })
        ),
    )
)]
#[post("/api/upload")]
pub async fn upload_image_handler(
    _admin: AdminUser,
    mut payload: Multipart,
    data: web::Data<AppState>,
) -> impl Responder {
    let use_case = &data.multimedia.upload_image;
    let max = use_case.policy().max_file_size_bytes;

    let mut upload: Option<ImageUpload> = None;

    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(e) => {
                warn!(error = %e, "Malformed multipart body");
                return ApiResponse::bad_request("INVALID_MULTIPART", "Malformed multipart body");
            }
        };

        if field.name() != Some(FILE_FIELD) || upload.is_some() {
            // drain fields we do not use
            while let Some(chunk) = field.next().await {
                if chunk.is_err() {
                    break;
                }
            }
            continue;
        }

        let content_type = field
            .content_type()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    warn!(error = %e, "Upload stream interrupted");
                    return ApiResponse::bad_request(
                        "INVALID_MULTIPART",
                        "Malformed multipart body",
                    );
                }
            };
            if (bytes.len() + chunk.len()) as u64 > max {
                return too_large(max);
            }
            bytes.extend_from_slice(&chunk);
        }

        upload = Some(ImageUpload {
            file_name,
            content_type,
            bytes,
        });
    }

    let Some(upload) = upload else {
        return ApiResponse::bad_request("MISSING_FILE", "Form field `file` is required");
    };

    match use_case.execute(upload).await {
        Ok(uploaded) => HttpResponse::Ok().json(UploadImageResponse { url: uploaded.url }),

        Err(UploadImageError::Rejected(UploadRejection::TooLarge { max, .. })) => too_large(max),

        Err(UploadImageError::Rejected(UploadRejection::Empty)) => {
            ApiResponse::bad_request("EMPTY_FILE", "File is empty")
        }

        Err(UploadImageError::Rejected(UploadRejection::UnsupportedType(t))) => {
            ApiResponse::bad_request(
                "UNSUPPORTED_FILE_TYPE",
                &format!("Unsupported file type: {t}"),
            )
        }

        Err(UploadImageError::StorageFailed(_)) => ApiResponse::error(
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            "UPLOAD_FAILED",
            "Upload failed",
        ),
    }
}
