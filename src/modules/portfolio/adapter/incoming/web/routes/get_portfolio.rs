use actix_web::{get, web, HttpResponse, Responder};

use crate::modules::portfolio::domain::PortfolioDocument;
use crate::shared::api::revision::with_etag;
use crate::AppState;

/// Public portfolio document
///
/// Always answers 200: when no backend holds a document the seed content is returned.
/// The body is the bare document; its revision travels in `ETag`.
#[utoipa::path(
    get,
    path = "/api/portfolio",
    tag = "portfolio",
    responses(
        (
            status = 200,
            description = "Current document",
            body = PortfolioDocument,
            headers(("ETag" = String, description = "Document revision, e.g. \"4\""))
        ),
    )
)]
#[get("/api/portfolio")]
pub async fn get_portfolio_handler(data: web::Data<AppState>) -> impl Responder {
    let current = data.portfolio.get.execute().await;
    with_etag(HttpResponse::Ok().json(&current.document), current.revision)
}
