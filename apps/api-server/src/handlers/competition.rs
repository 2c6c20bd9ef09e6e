//! Competition signup handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use signup_core::validation::CompetitionSignupForm;
use signup_shared::dto::{
    CompetitionSignupRequest, CompetitionStatsResponse, CountResponse, SignupCreatedResponse,
};

use super::group_dtos;
use crate::middleware::{AppResult, ClientContext};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CampaignQuery {
    pub campaign: Option<String>,
}

/// POST /api/competition-signups
pub async fn create(
    state: web::Data<AppState>,
    client: ClientContext,
    body: web::Json<CompetitionSignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let form = CompetitionSignupForm {
        email: req.email,
        accepted_rules: req.accepted_rules,
        campaign: req.campaign,
    };

    let signup = state.competition.sign_up(&client, form).await?;

    Ok(HttpResponse::Created().json(SignupCreatedResponse {
        id: signup.id,
        created_at: signup.created_at,
        submitted_at: None,
        message: "Successfully registered for the competition!".to_string(),
    }))
}

/// GET /api/competition-signups?campaign=
pub async fn count(
    state: web::Data<AppState>,
    query: web::Query<CampaignQuery>,
) -> AppResult<HttpResponse> {
    let campaign = query.into_inner().campaign.filter(|c| !c.is_empty());
    let count = state.competition.count(campaign.as_deref()).await?;

    Ok(HttpResponse::Ok().json(CountResponse {
        count,
        campaign: Some(campaign.unwrap_or_else(|| "all".to_string())),
        message: format!("Total competition signups: {count}"),
    }))
}

/// GET /api/competition-signups/stats
///
/// Unauthenticated; put an access-control layer in front of it before
/// exposing it publicly.
pub async fn stats(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let stats = state.competition.stats().await?;

    Ok(HttpResponse::Ok().json(CompetitionStatsResponse {
        total: stats.total,
        recent_count: stats.recent_count,
        by_campaign: group_dtos(stats.by_campaign),
        daily_signups: group_dtos(stats.daily_signups),
    }))
}
