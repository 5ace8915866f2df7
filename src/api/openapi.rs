use crate::api::schemas::{ErrorResponse, OkResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::auth::adapter::incoming::web::routes::{LoginRequestDto, LoginResponse};
use crate::multimedia::adapter::incoming::web::routes::UploadImageResponse;
use crate::portfolio::adapter::incoming::web::routes::AddSectionRequest;
use crate::portfolio::domain::{
    Experience, ExperienceChanges, Layout, PortfolioDocument, ProfileChanges, Project,
    ProjectChanges, ProjectStats, ProjectStatsChanges, Section, SectionChanges, SectionType,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio API",
        version = "1.0.0",
        description = "Public portfolio document and the admin endpoints that edit it"
    ),
    paths(
        // Auth
        crate::auth::adapter::incoming::web::routes::login_admin_handler,

        // Portfolio document
        crate::portfolio::adapter::incoming::web::routes::get_portfolio_handler,
        crate::portfolio::adapter::incoming::web::routes::save_portfolio_handler,
        crate::portfolio::adapter::incoming::web::routes::update_profile_handler,

        // Projects and sections
        crate::portfolio::adapter::incoming::web::routes::add_project_handler,
        crate::portfolio::adapter::incoming::web::routes::update_project_handler,
        crate::portfolio::adapter::incoming::web::routes::remove_project_handler,
        crate::portfolio::adapter::incoming::web::routes::add_section_handler,
        crate::portfolio::adapter::incoming::web::routes::update_section_handler,
        crate::portfolio::adapter::incoming::web::routes::remove_section_handler,

        // Experiences
        crate::portfolio::adapter::incoming::web::routes::add_experience_handler,
        crate::portfolio::adapter::incoming::web::routes::update_experience_handler,
        crate::portfolio::adapter::incoming::web::routes::remove_experience_handler,

        // Upload
        crate::multimedia::adapter::incoming::web::routes::upload_image_handler,
    ),
    components(
        schemas(
            // Response wrappers
            OkResponse,
            ErrorResponse,

            // Auth DTOs
            LoginRequestDto,
            LoginResponse,

            // Document
            PortfolioDocument,
            Layout,
            Project,
            ProjectStats,
            Section,
            SectionType,
            Experience,

            // Edits
            ProfileChanges,
            ProjectChanges,
            ProjectStatsChanges,
            SectionChanges,
            ExperienceChanges,
            AddSectionRequest,

            UploadImageResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Admin login"),
        (name = "portfolio", description = "Portfolio document and editing"),
        (name = "upload", description = "Image upload"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Admin access token from /api/auth/login"))
                        .build(),
                ),
            )
        }
    }
}
