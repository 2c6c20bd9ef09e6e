//! Health check, service descriptor and fallback route.

use std::collections::BTreeMap;

use actix_web::{HttpRequest, HttpResponse, web};

use signup_shared::ErrorResponse;
use signup_shared::dto::{HealthResponse, ServiceDescriptor};

use crate::observability::RequestId;
use crate::state::AppState;

/// Liveness probe. Does not touch the database.
///
/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        timestamp: chrono::Utc::now(),
        environment: state.settings.environment.clone(),
    })
}

/// GET /
pub async fn describe() -> HttpResponse {
    let endpoints = [
        ("health", "/health"),
        ("betaSignups", "/api/beta-signups"),
        ("competitionSignups", "/api/competition-signups"),
        ("competitionSubmissions", "/api/competition-submissions"),
        ("goalpostBeta", "/api/goalpost-beta"),
    ]
    .into_iter()
    .map(|(name, path)| (name.to_string(), path.to_string()))
    .collect::<BTreeMap<_, _>>();

    HttpResponse::Ok().json(ServiceDescriptor {
        name: "BridgeMind Signup API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}

/// Fallback for unmatched routes.
pub async fn not_found(req: HttpRequest, request_id: RequestId) -> HttpResponse {
    let error = ErrorResponse::not_found(format!("No route for {} {}", req.method(), req.path()))
        .with_instance(req.path())
        .with_request_id(request_id.as_str());

    HttpResponse::NotFound().json(error)
}
