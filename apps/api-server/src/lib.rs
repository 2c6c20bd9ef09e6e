//! # Signup API Server
//!
//! Beta, competition and GoalPost signup forms over HTTP. The binary in
//! `main.rs` wires configuration and infrastructure; this library builds
//! the application so integration tests can drive it in-process.

pub mod background;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod notifications;
pub mod observability;
pub mod services;
pub mod state;
pub mod telemetry;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use tracing_actix_web::TracingLogger;

use crate::middleware::Cors;
use crate::middleware::error::json_error_handler;
use crate::observability::RequestIdMiddleware;
use crate::state::AppState;

/// JSON bodies above this size are refused.
pub const JSON_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Build the application with its middleware stack. From the outside in:
/// request tracing, request ID, CORS, then the routes.
pub fn create_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let cors = Cors::new(&state.settings.cors_origin);

    App::new()
        .app_data(web::Data::new(state))
        .app_data(
            web::JsonConfig::default()
                .limit(JSON_BODY_LIMIT)
                .error_handler(json_error_handler),
        )
        .configure(handlers::configure_routes)
        .default_service(web::to(handlers::not_found))
        .wrap(cors)
        .wrap(RequestIdMiddleware)
        .wrap(TracingLogger::default())
}
