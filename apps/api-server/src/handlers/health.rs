//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
    pub timestamp: String,
}

/// Health check endpoint - returns server status.
///
/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database = match &state.db {
        Some(db) => {
            if db.ping().await {
                "up"
            } else {
                "down"
            }
        }
        None => "disabled",
    };

    let response = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    HttpResponse::Ok().json(response)
}
