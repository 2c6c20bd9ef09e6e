//! Competition submission handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use signup_core::domain::{DEFAULT_SUBMISSION_CAMPAIGN, mask_email};
use signup_core::validation::CompetitionSubmissionForm;
use signup_shared::dto::{
    CompetitionSubmissionRequest, CountResponse, RecentSubmission, RecentSubmissionsResponse,
    SignupCreatedResponse,
};

use crate::middleware::{AppResult, ClientContext};
use crate::state::AppState;

pub const DEFAULT_RECENT_LIMIT: u64 = 10;
pub const MAX_RECENT_LIMIT: u64 = 100;

#[derive(Debug, Deserialize)]
pub struct CampaignQuery {
    pub campaign: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<String>,
}

/// Unparseable or non-positive limits fall back to the default.
fn recent_limit(raw: Option<&str>) -> u64 {
    raw.and_then(|l| l.trim().parse::<u64>().ok())
        .filter(|l| *l > 0)
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .min(MAX_RECENT_LIMIT)
}

/// POST /api/competition-submissions
pub async fn create(
    state: web::Data<AppState>,
    client: ClientContext,
    body: web::Json<CompetitionSubmissionRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let form = CompetitionSubmissionForm {
        email: req.email,
        project_url: req.project_url,
        project_title: req.project_title,
        description: req.description,
        campaign: req.campaign,
    };

    let submission = state.submissions.submit(&client, form).await?;

    Ok(HttpResponse::Created().json(SignupCreatedResponse {
        id: submission.id,
        created_at: submission.created_at,
        submitted_at: Some(submission.submitted_at),
        message: "Project submitted successfully!".to_string(),
    }))
}

/// GET /api/competition-submissions?campaign=
pub async fn count(
    state: web::Data<AppState>,
    query: web::Query<CampaignQuery>,
) -> AppResult<HttpResponse> {
    let campaign = query
        .into_inner()
        .campaign
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_SUBMISSION_CAMPAIGN.to_string());
    let count = state.submissions.count(&campaign).await?;

    Ok(HttpResponse::Ok().json(CountResponse {
        count,
        campaign: Some(campaign),
        message: format!("Total competition submissions: {count}"),
    }))
}

/// GET /api/competition-submissions/recent?limit=
///
/// Emails are masked in the listing.
pub async fn recent(
    state: web::Data<AppState>,
    query: web::Query<RecentQuery>,
) -> AppResult<HttpResponse> {
    let limit = recent_limit(query.limit.as_deref());
    let submissions: Vec<RecentSubmission> = state
        .submissions
        .recent(DEFAULT_SUBMISSION_CAMPAIGN, limit)
        .await?
        .into_iter()
        .map(|s| RecentSubmission {
            email: mask_email(&s.email),
            project_url: s.project_url,
            project_title: s.project_title,
            submitted_at: s.submitted_at,
        })
        .collect();

    Ok(HttpResponse::Ok().json(RecentSubmissionsResponse {
        count: submissions.len(),
        submissions,
    }))
}
