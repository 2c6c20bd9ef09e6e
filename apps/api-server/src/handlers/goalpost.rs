//! GoalPost beta handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use signup_core::domain::Platform;
use signup_core::error::DomainError;
use signup_core::validation::{GoalpostBetaForm, Violation};
use signup_shared::dto::{
    GoalpostBetaRequest, GoalpostCountsResponse, PlatformCountResponse, SignupCreatedResponse,
};

use crate::middleware::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PlatformQuery {
    pub platform: Option<String>,
}

/// POST /api/goalpost-beta
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<GoalpostBetaRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let form = GoalpostBetaForm {
        email: req.email,
        platform: req.platform,
    };

    let signup = state.goalpost.sign_up(form).await?;

    Ok(HttpResponse::Created().json(SignupCreatedResponse {
        id: signup.id,
        created_at: signup.created_at,
        submitted_at: None,
        message: format!("Successfully joined the GoalPost beta on {}", signup.platform),
    }))
}

/// GET /api/goalpost-beta[?platform=ios|android]
pub async fn counts(
    state: web::Data<AppState>,
    query: web::Query<PlatformQuery>,
) -> AppResult<HttpResponse> {
    if let Some(raw) = query.into_inner().platform.filter(|p| !p.is_empty()) {
        let platform: Platform = raw
            .parse()
            .map_err(|v: Violation| DomainError::Validation(v.into()))?;
        let count = state.goalpost.count_for(platform).await?;

        return Ok(HttpResponse::Ok().json(PlatformCountResponse {
            platform: platform.to_string(),
            count,
        }));
    }

    let mut response = GoalpostCountsResponse { ios: 0, android: 0 };
    for (platform, count) in state.goalpost.counts().await? {
        match platform {
            Platform::Ios => response.ios = count,
            Platform::Android => response.android = count,
        }
    }

    Ok(HttpResponse::Ok().json(response))
}
