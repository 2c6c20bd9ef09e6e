use std::sync::Arc;

use chrono::{Duration, Utc};

use signup_core::domain::{CompetitionSignup, GroupCount};
use signup_core::error::DomainError;
use signup_core::ports::{AdmissionGate, CompetitionSignupRepository};
use signup_core::validation::{CompetitionSignupForm, validate_competition_signup};

use super::admission::admit;
use crate::middleware::ClientContext;
use crate::notifications::{Notifier, templates};

pub const DUPLICATE_MESSAGE: &str = "You have already entered with this email.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetitionStats {
    pub total: u64,
    pub recent_count: u64,
    pub by_campaign: Vec<GroupCount>,
    pub daily_signups: Vec<GroupCount>,
}

/// With an allowed origin configured (and not `*`), the request's
/// `Origin` or `Referer` must start with it.
pub fn origin_allowed(allowed: Option<&str>, client: &ClientContext) -> bool {
    let Some(allowed) = allowed.filter(|a| *a != "*") else {
        return true;
    };

    [&client.origin, &client.referer]
        .into_iter()
        .flatten()
        .any(|value| value.starts_with(allowed))
}

pub struct CompetitionSignupService {
    store: Arc<dyn CompetitionSignupRepository>,
    gate: Arc<dyn AdmissionGate>,
    notifier: Notifier,
    allowed_origin: Option<String>,
}

impl CompetitionSignupService {
    pub fn new(
        store: Arc<dyn CompetitionSignupRepository>,
        gate: Arc<dyn AdmissionGate>,
        notifier: Notifier,
        allowed_origin: Option<String>,
    ) -> Self {
        Self {
            store,
            gate,
            notifier,
            allowed_origin,
        }
    }

    /// The origin check runs first so a rejected origin does not consume
    /// the client's admission budget.
    pub async fn sign_up(
        &self,
        client: &ClientContext,
        form: CompetitionSignupForm,
    ) -> Result<CompetitionSignup, DomainError> {
        if !origin_allowed(self.allowed_origin.as_deref(), client) {
            tracing::warn!(
                origin = ?client.origin,
                referer = ?client.referer,
                "Competition signup from disallowed origin"
            );
            return Err(DomainError::OriginRejected);
        }

        admit(self.gate.as_ref(), &client.ip).await?;

        let signup = validate_competition_signup(form)?;

        let signup = self
            .store
            .create(signup)
            .await
            .map_err(|e| DomainError::from_store(e, DUPLICATE_MESSAGE))?;

        tracing::info!(id = %signup.id, campaign = %signup.campaign, "Competition signup created");
        self.notifier.dispatch(templates::competition_confirmation(&signup.email));

        Ok(signup)
    }

    pub async fn count(&self, campaign: Option<&str>) -> Result<u64, DomainError> {
        self.store
            .count_in(campaign)
            .await
            .map_err(DomainError::Repository)
    }

    pub async fn stats(&self) -> Result<CompetitionStats, DomainError> {
        let now = Utc::now();
        let day_ago = now - Duration::hours(24);
        let week_ago = now - Duration::days(7);

        let (total, recent_count, by_campaign, daily_signups) = tokio::try_join!(
            self.store.count_in(None),
            self.store.count_since(day_ago),
            self.store.count_by_campaign(),
            self.store.daily_counts(week_ago),
        )
        .map_err(DomainError::Repository)?;

        Ok(CompetitionStats {
            total,
            recent_count,
            by_campaign,
            daily_signups,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(origin: Option<&str>, referer: Option<&str>) -> ClientContext {
        ClientContext {
            ip: "203.0.113.7".to_string(),
            origin: origin.map(str::to_string),
            referer: referer.map(str::to_string),
        }
    }

    #[test]
    fn test_no_restriction_allows_everything() {
        assert!(origin_allowed(None, &client(None, None)));
        assert!(origin_allowed(Some("*"), &client(Some("https://x.io"), None)));
    }

    #[test]
    fn test_origin_or_referer_prefix_must_match() {
        let allowed = Some("https://bridgemind.ai");

        assert!(origin_allowed(allowed, &client(Some("https://bridgemind.ai"), None)));
        assert!(origin_allowed(
            allowed,
            &client(None, Some("https://bridgemind.ai/competition"))
        ));
        assert!(!origin_allowed(allowed, &client(Some("https://evil.example"), None)));
        assert!(!origin_allowed(allowed, &client(None, None)));
    }
}
