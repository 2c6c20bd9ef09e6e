use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Campaign a competition signup lands in when the form names none.
pub const DEFAULT_SIGNUP_CAMPAIGN: &str = "1k-subs";

/// Competition entry. At most one per (email, campaign).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionSignup {
    pub id: Uuid,
    pub email: String,
    pub accepted_rules: bool,
    pub campaign: String,
    pub created_at: DateTime<Utc>,
}

impl CompetitionSignup {
    /// Create an entry. Only reachable with the rules accepted.
    pub fn new(email: String, campaign: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            accepted_rules: true,
            campaign,
            created_at: Utc::now(),
        }
    }
}
