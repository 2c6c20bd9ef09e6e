use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    BetaDimension, BetaSignup, CompetitionSignup, CompetitionSubmission, GoalpostBetaSignup,
    GroupCount, Platform,
};
use crate::error::RepoError;

/// Create-only document store with a storage-enforced uniqueness key.
#[async_trait]
pub trait RecordStore<T>: Send + Sync {
    /// Insert a record. A taken uniqueness key yields `RepoError::Duplicate`;
    /// the check is atomic with the insert.
    async fn create(&self, record: T) -> Result<T, RepoError>;

    /// Total number of records.
    async fn count(&self) -> Result<u64, RepoError>;
}

/// Beta signups, unique per email.
#[async_trait]
pub trait BetaSignupRepository: RecordStore<BetaSignup> {
    /// Count grouped by a metadata field, largest bucket first.
    async fn count_by(&self, dimension: BetaDimension) -> Result<Vec<GroupCount>, RepoError>;
}

/// Competition signups, unique per (email, campaign).
#[async_trait]
pub trait CompetitionSignupRepository: RecordStore<CompetitionSignup> {
    /// Count, optionally restricted to one campaign.
    async fn count_in(&self, campaign: Option<&str>) -> Result<u64, RepoError>;

    /// Count grouped by campaign, largest bucket first.
    async fn count_by_campaign(&self) -> Result<Vec<GroupCount>, RepoError>;

    /// Count of signups created at or after `since`.
    async fn count_since(&self, since: DateTime<Utc>) -> Result<u64, RepoError>;

    /// Signups per UTC day (`YYYY-MM-DD`) since `since`, oldest day first.
    async fn daily_counts(&self, since: DateTime<Utc>) -> Result<Vec<GroupCount>, RepoError>;
}

/// Project submissions, unique per (email, campaign).
#[async_trait]
pub trait CompetitionSubmissionRepository: RecordStore<CompetitionSubmission> {
    async fn count_in(&self, campaign: &str) -> Result<u64, RepoError>;

    /// Most recent submissions of a campaign, newest first.
    async fn recent(
        &self,
        campaign: &str,
        limit: u64,
    ) -> Result<Vec<CompetitionSubmission>, RepoError>;
}

/// GoalPost beta signups, unique per (email, platform).
#[async_trait]
pub trait GoalpostBetaRepository: RecordStore<GoalpostBetaSignup> {
    async fn count_for(&self, platform: Platform) -> Result<u64, RepoError>;
}
