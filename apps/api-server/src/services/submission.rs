use std::sync::Arc;

use signup_core::domain::CompetitionSubmission;
use signup_core::error::DomainError;
use signup_core::ports::{AdmissionGate, CompetitionSubmissionRepository};
use signup_core::validation::{CompetitionSubmissionForm, validate_competition_submission};

use super::admission::admit;
use crate::middleware::ClientContext;
use crate::notifications::{Notifier, templates};

pub const DUPLICATE_MESSAGE: &str = "You have already submitted a project with this email.";

pub struct CompetitionSubmissionService {
    store: Arc<dyn CompetitionSubmissionRepository>,
    gate: Arc<dyn AdmissionGate>,
    notifier: Notifier,
}

impl CompetitionSubmissionService {
    pub fn new(
        store: Arc<dyn CompetitionSubmissionRepository>,
        gate: Arc<dyn AdmissionGate>,
        notifier: Notifier,
    ) -> Self {
        Self {
            store,
            gate,
            notifier,
        }
    }

    pub async fn submit(
        &self,
        client: &ClientContext,
        form: CompetitionSubmissionForm,
    ) -> Result<CompetitionSubmission, DomainError> {
        admit(self.gate.as_ref(), &client.ip).await?;

        let submission = validate_competition_submission(form)?;

        let submission = self
            .store
            .create(submission)
            .await
            .map_err(|e| DomainError::from_store(e, DUPLICATE_MESSAGE))?;

        tracing::info!(
            id = %submission.id,
            campaign = %submission.campaign,
            "Competition submission created"
        );
        self.notifier.dispatch(templates::submission_confirmation(
            &submission.email,
            &submission.project_url,
            submission.project_title.as_deref(),
        ));

        Ok(submission)
    }

    pub async fn count(&self, campaign: &str) -> Result<u64, DomainError> {
        self.store
            .count_in(campaign)
            .await
            .map_err(DomainError::Repository)
    }

    pub async fn recent(
        &self,
        campaign: &str,
        limit: u64,
    ) -> Result<Vec<CompetitionSubmission>, DomainError> {
        self.store
            .recent(campaign, limit)
            .await
            .map_err(DomainError::Repository)
    }
}
