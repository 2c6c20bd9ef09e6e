//! Error handling - RFC 7807 compliant responses.

use actix_web::HttpMessage;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use actix_web::{
    HttpRequest, HttpResponse, ResponseError, error::InternalError, error::JsonPayloadError,
    http::StatusCode,
};
use signup_core::error::{DomainError, RepoError};
use signup_shared::ErrorResponse;

use crate::observability::RequestId;

static EXPOSE_INTERNAL_DETAIL: AtomicBool = AtomicBool::new(false);

/// Whether 500 responses carry the underlying error text. Enabled
/// outside production.
pub fn expose_internal_detail(enabled: bool) {
    EXPOSE_INTERNAL_DETAIL.store(enabled, Ordering::Relaxed);
}

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    TooManyRequests { retry_after: Duration },
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::TooManyRequests { retry_after } => {
                write!(f, "Too many requests, retry after {}s", retry_after.as_secs())
            }
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Forbidden(detail) => ErrorResponse::forbidden(detail),
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::TooManyRequests { retry_after } => {
                // Round up so clients never retry inside the window.
                let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
                return HttpResponse::TooManyRequests()
                    .insert_header(("X-RateLimit-Remaining", "0"))
                    .insert_header(("Retry-After", secs.max(1).to_string()))
                    .json(ErrorResponse::too_many_requests());
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                let error = ErrorResponse::internal_error();
                if EXPOSE_INTERNAL_DETAIL.load(Ordering::Relaxed) {
                    error.with_detail(detail)
                } else {
                    error.with_detail("An unexpected error occurred")
                }
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(errors) => AppError::BadRequest(errors.to_string()),
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
            DomainError::OriginRejected => {
                AppError::Forbidden("Request origin is not allowed".to_string())
            }
            DomainError::RateLimited { retry_after } => AppError::TooManyRequests { retry_after },
            DomainError::Repository(err) => err.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(index) => {
                AppError::Conflict(format!("A record with this information already exists ({index})"))
            }
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal(format!("Database connection error: {msg}"))
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal(format!("Database query error: {msg}"))
            }
        }
    }
}

/// Turn undecodable JSON bodies into 400 problem responses.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let mut body = ErrorResponse::bad_request(format!("Invalid JSON body: {err}"))
        .with_instance(req.path());
    if let Some(id) = req.extensions().get::<RequestId>() {
        body = body.with_request_id(id.as_str());
    }

    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
