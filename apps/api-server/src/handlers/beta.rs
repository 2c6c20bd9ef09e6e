//! Beta signup handlers.

use actix_web::{HttpResponse, web};

use signup_core::validation::BetaSignupForm;
use signup_shared::dto::{BetaSignupRequest, BetaStatsResponse, CountResponse, SignupCreatedResponse};

use super::group_dtos;
use crate::middleware::AppResult;
use crate::state::AppState;

/// POST /api/beta-signups
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<BetaSignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let form = BetaSignupForm {
        email: req.email,
        experience: req.experience,
        goal: req.goal,
        referrer: req.referrer,
        referrer_other: req.referrer_other,
    };

    let signup = state.beta.sign_up(form).await?;

    Ok(HttpResponse::Created().json(SignupCreatedResponse {
        id: signup.id,
        created_at: signup.created_at,
        submitted_at: None,
        message: "Successfully signed up for beta access".to_string(),
    }))
}

/// GET /api/beta-signups
pub async fn count(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let count = state.beta.count().await?;

    Ok(HttpResponse::Ok().json(CountResponse {
        count,
        campaign: None,
        message: format!("Total beta signups: {count}"),
    }))
}

/// GET /api/beta-signups/stats
///
/// Unauthenticated; put an access-control layer in front of it before
/// exposing it publicly.
pub async fn stats(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let stats = state.beta.stats().await?;

    Ok(HttpResponse::Ok().json(BetaStatsResponse {
        total: stats.total,
        by_referrer: group_dtos(stats.by_referrer),
        by_experience: group_dtos(stats.by_experience),
        by_goal: group_dtos(stats.by_goal),
    }))
}
