use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Campaign a project submission lands in when the form names none.
pub const DEFAULT_SUBMISSION_CAMPAIGN: &str = "1k-subs-competition";

/// Project submitted to a competition. At most one per (email, campaign).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionSubmission {
    pub id: Uuid,
    pub email: String,
    pub project_url: String,
    pub project_title: Option<String>,
    pub description: Option<String>,
    pub campaign: String,
    pub submitted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl CompetitionSubmission {
    pub fn new(
        email: String,
        project_url: String,
        project_title: Option<String>,
        description: Option<String>,
        campaign: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            project_url,
            project_title,
            description,
            campaign,
            submitted_at: now,
            created_at: now,
        }
    }
}
