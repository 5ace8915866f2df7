use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadinessResponse {
    status: &'static str,
    reachable: Vec<&'static str>,
}

/// LIVENESS CHECK
/// - No I/O
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

/// READINESS CHECK
/// - Pings every document backend
/// - Ready while at least one answers
#[get("/ready")]
pub async fn readiness(data: web::Data<AppState>) -> impl Responder {
    let reachable = data.document_store.reachable_backends().await;

    if reachable.is_empty() {
        HttpResponse::ServiceUnavailable().json(ReadinessResponse {
            status: "unhealthy",
            reachable,
        })
    } else {
        HttpResponse::Ok().json(ReadinessResponse {
            status: "ok",
            reachable,
        })
    }
}
