pub mod api;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::auth;
pub use modules::multimedia;
pub use modules::portfolio;

use crate::api::openapi::ApiDoc;
use crate::auth::adapter::outgoing::admin_config::AdminConfig;
use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::adapter::outgoing::security::Argon2Hasher;
use crate::auth::application::ports::incoming::use_cases::LoginAdminUseCase;
use crate::auth::application::ports::outgoing::{PasswordHasher, TokenProvider};
use crate::auth::application::service::LoginAdminService;
use crate::multimedia::adapter::outgoing::UploadConfig;
use crate::multimedia::application::service::{FetchUploadService, UploadImageService};
use crate::multimedia::application::MultimediaUseCases;
use crate::portfolio::adapter::outgoing::StoreConfig;
use crate::portfolio::application::ports::outgoing::DocumentStore;
use crate::portfolio::application::service::{
    EditPortfolioService, GetPortfolioService, PortfolioStore, SavePortfolioService,
};
use crate::portfolio::application::PortfolioUseCases;
use crate::shared::api::json_config::custom_json_config;
use crate::shared::config::{load_env_files, ServerConfig};

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub portfolio: PortfolioUseCases,
    pub login_admin: Arc<dyn LoginAdminUseCase + Send + Sync>,
    pub multimedia: MultimediaUseCases,
    pub document_store: Arc<dyn DocumentStore>,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    let env = load_env_files();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(environment = %env, "Starting application...");

    let server = ServerConfig::from_env()?;

    // Portfolio document store
    let backends = StoreConfig::from_env()?.build_backends().await;
    let store = Arc::new(PortfolioStore::new(backends));
    info!(backends = ?store.backend_names(), "Document store ready");

    let portfolio = PortfolioUseCases {
        get: Arc::new(GetPortfolioService::new(Arc::clone(&store))),
        save: Arc::new(SavePortfolioService::new(Arc::clone(&store))),
        edit: Arc::new(EditPortfolioService::new(Arc::clone(&store))),
    };

    // Admin auth
    let token_provider: Arc<dyn TokenProvider + Send + Sync> =
        Arc::new(JwtTokenService::new(JwtConfig::from_env()?));
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::from_env()?);
    let admin = AdminConfig::from_env()?
        .into_account(hasher.as_ref())
        .await
        .context("preparing admin account")?;
    info!(admin = %admin.email(), "Admin account loaded");

    let login_admin = LoginAdminService::new(admin, hasher, Arc::clone(&token_provider));

    // Uploads
    let upload = UploadConfig::from_env()?;
    let storage = upload.build_storage();
    info!(storage = storage.name(), max_bytes = upload.max_bytes, "Upload storage ready");

    let multimedia = MultimediaUseCases {
        upload_image: Arc::new(UploadImageService::new(upload.policy(), Arc::clone(&storage))),
        fetch_upload: Arc::new(FetchUploadService::new(storage)),
    };

    let document_store: Arc<dyn DocumentStore> = store;
    let state = AppState {
        portfolio,
        login_admin: Arc::new(login_admin),
        multimedia,
        document_store,
    };

    let bind_address = server.bind_address();
    info!(address = %bind_address, "Server listening");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider)))
            .app_data(custom_json_config())
            .configure(init_routes)
    })
    .bind(&bind_address)
    .with_context(|| format!("binding {bind_address}"))?
    .run()
    .await?;

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Docs
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
    // Auth
    cfg.service(crate::auth::adapter::incoming::web::routes::login_admin_handler);
    // Portfolio
    cfg.service(crate::portfolio::adapter::incoming::web::routes::get_portfolio_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::save_portfolio_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::update_profile_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::add_project_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::update_project_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::remove_project_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::add_section_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::update_section_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::remove_section_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::add_experience_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::update_experience_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::remove_experience_handler);
    // Uploads
    cfg.service(crate::multimedia::adapter::incoming::web::routes::upload_image_handler);
    cfg.service(crate::multimedia::adapter::incoming::web::routes::serve_upload_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
        std::process::exit(1);
    }
}
