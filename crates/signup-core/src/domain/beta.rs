use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Beta access request. At most one per email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetaSignup {
    pub id: Uuid,
    pub email: String,
    pub experience: Option<String>,
    pub goal: Option<String>,
    pub referrer: Option<String>,
    pub referrer_other: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BetaSignup {
    /// Create a new signup with generated ID and timestamp.
    pub fn new(
        email: String,
        experience: Option<String>,
        goal: Option<String>,
        referrer: Option<String>,
        referrer_other: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            experience,
            goal,
            referrer,
            referrer_other,
            created_at: Utc::now(),
        }
    }
}

/// Metadata field a beta signup breakdown is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetaDimension {
    Referrer,
    Experience,
    Goal,
}

impl BetaDimension {
    /// Read the grouping value off a signup.
    pub fn value_of<'a>(&self, signup: &'a BetaSignup) -> Option<&'a str> {
        match self {
            BetaDimension::Referrer => signup.referrer.as_deref(),
            BetaDimension::Experience => signup.experience.as_deref(),
            BetaDimension::Goal => signup.goal.as_deref(),
        }
    }
}
