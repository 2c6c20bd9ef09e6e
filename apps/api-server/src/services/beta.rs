use std::sync::Arc;

use signup_core::domain::{BetaDimension, BetaSignup, GroupCount};
use signup_core::error::DomainError;
use signup_core::ports::BetaSignupRepository;
use signup_core::validation::{BetaSignupForm, validate_beta_signup};

use crate::notifications::{Notifier, templates};

pub const DUPLICATE_MESSAGE: &str = "This email is already registered for beta access";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetaStats {
    pub total: u64,
    pub by_referrer: Vec<GroupCount>,
    pub by_experience: Vec<GroupCount>,
    pub by_goal: Vec<GroupCount>,
}

pub struct BetaSignupService {
    store: Arc<dyn BetaSignupRepository>,
    notifier: Notifier,
}

impl BetaSignupService {
    pub fn new(store: Arc<dyn BetaSignupRepository>, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    pub async fn sign_up(&self, form: BetaSignupForm) -> Result<BetaSignup, DomainError> {
        let signup = validate_beta_signup(form)?;

        let signup = self
            .store
            .create(signup)
            .await
            .map_err(|e| DomainError::from_store(e, DUPLICATE_MESSAGE))?;

        tracing::info!(id = %signup.id, "Beta signup created");
        self.notifier.dispatch(templates::beta_confirmation(&signup.email));

        Ok(signup)
    }

    pub async fn count(&self) -> Result<u64, DomainError> {
        self.store.count().await.map_err(DomainError::Repository)
    }

    pub async fn stats(&self) -> Result<BetaStats, DomainError> {
        let (total, by_referrer, by_experience, by_goal) = tokio::try_join!(
            self.store.count(),
            self.store.count_by(BetaDimension::Referrer),
            self.store.count_by(BetaDimension::Experience),
            self.store.count_by(BetaDimension::Goal),
        )
        .map_err(DomainError::Repository)?;

        Ok(BetaStats {
            total,
            by_referrer,
            by_experience,
            by_goal,
        })
    }
}
