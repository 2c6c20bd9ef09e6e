use std::sync::Arc;

use futures::future::try_join_all;

use signup_core::domain::{GoalpostBetaSignup, Platform};
use signup_core::error::DomainError;
use signup_core::ports::GoalpostBetaRepository;
use signup_core::validation::{GoalpostBetaForm, validate_goalpost_beta};

use crate::notifications::{Notifier, templates};

pub const DUPLICATE_MESSAGE: &str = "Already registered for this platform.";

pub struct GoalpostBetaService {
    store: Arc<dyn GoalpostBetaRepository>,
    notifier: Notifier,
}

impl GoalpostBetaService {
    pub fn new(store: Arc<dyn GoalpostBetaRepository>, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    pub async fn sign_up(&self, form: GoalpostBetaForm) -> Result<GoalpostBetaSignup, DomainError> {
        let signup = validate_goalpost_beta(form)?;

        let signup = self
            .store
            .create(signup)
            .await
            .map_err(|e| DomainError::from_store(e, DUPLICATE_MESSAGE))?;

        tracing::info!(id = %signup.id, platform = %signup.platform, "GoalPost beta signup created");
        self.notifier
            .dispatch(templates::goalpost_beta_ack(&signup.email, signup.platform));

        Ok(signup)
    }

    pub async fn count_for(&self, platform: Platform) -> Result<u64, DomainError> {
        self.store
            .count_for(platform)
            .await
            .map_err(DomainError::Repository)
    }

    /// Counts for every platform, in `Platform::ALL` order.
    pub async fn counts(&self) -> Result<Vec<(Platform, u64)>, DomainError> {
        let counts = try_join_all(Platform::ALL.map(|p| self.count_for(p))).await?;
        Ok(Platform::ALL.into_iter().zip(counts).collect())
    }
}
