use actix_web::HttpResponse;
use tracing::{error, warn};

use crate::modules::portfolio::application::ports::incoming::use_cases::{
    EditPortfolioError, EditResult, Edited,
};
use crate::modules::portfolio::domain::EditorError;
use crate::shared::api::revision::with_etag;
use crate::shared::api::ApiResponse;

/// 201 for additions, 200 otherwise. The new revision goes out in `ETag`.
pub(super) fn edit_response(
    result: Result<EditResult, EditPortfolioError>,
    created: bool,
) -> HttpResponse {
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => return edit_error_response(e),
    };

    let response = match (&outcome.edited, created) {
        (Edited::Removed, _) => ApiResponse::ok(),
        (Edited::Profile(doc), _) => ApiResponse::success(doc.as_ref()),
        (Edited::Project(project), true) => ApiResponse::created(project),
        (Edited::Project(project), false) => ApiResponse::success(project),
        (Edited::Section(section), true) => ApiResponse::created(section),
        (Edited::Section(section), false) => ApiResponse::success(section),
        (Edited::Experience(experience), true) => ApiResponse::created(experience),
        (Edited::Experience(experience), false) => ApiResponse::success(experience),
    };

    with_etag(response, outcome.revision)
}

fn edit_error_response(e: EditPortfolioError) -> HttpResponse {
    match e {
        EditPortfolioError::Editor(EditorError::ProjectNotFound(_)) => {
            ApiResponse::not_found("PROJECT_NOT_FOUND", &e.to_string())
        }
        EditPortfolioError::Editor(EditorError::ExperienceNotFound(_)) => {
            ApiResponse::not_found("EXPERIENCE_NOT_FOUND", &e.to_string())
        }
        EditPortfolioError::Editor(EditorError::SectionNotFound(_)) => {
            ApiResponse::not_found("SECTION_NOT_FOUND", &e.to_string())
        }
        EditPortfolioError::Editor(EditorError::CoverImageRequired) => {
            ApiResponse::unprocessable("COVER_IMAGE_REQUIRED", &e.to_string())
        }
        EditPortfolioError::Editor(EditorError::IdSpaceExhausted(_)) => {
            ApiResponse::unprocessable("ID_SPACE_EXHAUSTED", &e.to_string())
        }
        EditPortfolioError::Editor(ref inner) => {
            warn!(error = %inner, "Edit rejected by editor state");
            ApiResponse::unprocessable("INVALID_EDIT_STEP", &e.to_string())
        }
        EditPortfolioError::Conflict { .. } => {
            ApiResponse::conflict("REVISION_CONFLICT", &e.to_string())
        }
        EditPortfolioError::SaveFailed(ref reason) => {
            error!(error = %reason, "Edit could not be saved");
            ApiResponse::save_failed()
        }
    }
}
