//! HTTP route handlers

use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use serde_json::json;

/// Health check endpoint handler
///
/// 503 when the user directory does not answer; an unreachable cache only
/// shows in the body.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let health = state.storage.health_check().await;
    let body = json!({
        "status": if health.is_healthy() { "healthy" } else { "degraded" },
        "database": health.database,
        "cache": health.cache,
        "backend": health.backend,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    });

    if health.is_healthy() {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
