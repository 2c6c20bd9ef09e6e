//! In-memory record stores - used by tests and local development.
//!
//! Each store enforces the same uniqueness key as its PostgreSQL table.
//! The key check and the push happen under one write lock, so concurrent
//! creates for the same key cannot both succeed.
//! Note: Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use signup_core::domain::{
    BetaDimension, BetaSignup, CompetitionSignup, CompetitionSubmission, GoalpostBetaSignup,
    GroupCount, Platform,
};
use signup_core::error::RepoError;
use signup_core::ports::{
    BetaSignupRepository, CompetitionSignupRepository, CompetitionSubmissionRepository,
    GoalpostBetaRepository, RecordStore,
};

/// Storage-level uniqueness key of a record type.
pub trait UniqueKey {
    type Key: PartialEq;

    /// Name of the matching unique index, reported on violations.
    const INDEX: &'static str;

    fn unique_key(&self) -> Self::Key;
}

impl UniqueKey for BetaSignup {
    type Key = String;
    const INDEX: &'static str = "idx_beta_signups_email";

    fn unique_key(&self) -> Self::Key {
        self.email.clone()
    }
}

impl UniqueKey for CompetitionSignup {
    type Key = (String, String);
    const INDEX: &'static str = "idx_competition_signups_email_campaign";

    fn unique_key(&self) -> Self::Key {
        (self.email.clone(), self.campaign.clone())
    }
}

impl UniqueKey for CompetitionSubmission {
    type Key = (String, String);
    const INDEX: &'static str = "idx_competition_submissions_email_campaign";

    fn unique_key(&self) -> Self::Key {
        (self.email.clone(), self.campaign.clone())
    }
}

impl UniqueKey for GoalpostBetaSignup {
    type Key = (String, Platform);
    const INDEX: &'static str = "idx_goalpost_beta_signups_email_platform";

    fn unique_key(&self) -> Self::Key {
        (self.email.clone(), self.platform)
    }
}

/// Append-only in-memory store using a Vec behind an async RwLock.
pub struct InMemoryStore<T> {
    records: RwLock<Vec<T>>,
}

pub type InMemoryBetaSignupStore = InMemoryStore<BetaSignup>;
pub type InMemoryCompetitionSignupStore = InMemoryStore<CompetitionSignup>;
pub type InMemoryCompetitionSubmissionStore = InMemoryStore<CompetitionSubmission>;
pub type InMemoryGoalpostBetaStore = InMemoryStore<GoalpostBetaSignup>;

impl<T> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> RecordStore<T> for InMemoryStore<T>
where
    T: UniqueKey + Clone + Send + Sync + 'static,
{
    async fn create(&self, record: T) -> Result<T, RepoError> {
        let mut records = self.records.write().await;

        let key = record.unique_key();
        if records.iter().any(|existing| existing.unique_key() == key) {
            return Err(RepoError::Duplicate(T::INDEX.to_string()));
        }

        records.push(record.clone());
        Ok(record)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.records.read().await.len() as u64)
    }
}

/// Group in first-seen order, then rank by count.
fn group<'a>(keys: impl Iterator<Item = Option<&'a str>>) -> Vec<GroupCount> {
    let mut order: Vec<Option<&str>> = Vec::new();
    let mut counts: HashMap<Option<&str>, u64> = HashMap::new();

    for key in keys {
        let count = counts.entry(key).or_insert_with(|| {
            order.push(key);
            0
        });
        *count += 1;
    }

    GroupCount::rank(
        order
            .into_iter()
            .map(|key| GroupCount::new(key.map(str::to_string), counts[&key]))
            .collect(),
    )
}

#[async_trait]
impl BetaSignupRepository for InMemoryBetaSignupStore {
    async fn count_by(&self, dimension: BetaDimension) -> Result<Vec<GroupCount>, RepoError> {
        let records = self.records.read().await;
        Ok(group(records.iter().map(|s| dimension.value_of(s))))
    }
}

#[async_trait]
impl CompetitionSignupRepository for InMemoryCompetitionSignupStore {
    async fn count_in(&self, campaign: Option<&str>) -> Result<u64, RepoError> {
        let records = self.records.read().await;
        let count = records
            .iter()
            .filter(|s| campaign.is_none_or(|c| s.campaign == c))
            .count();
        Ok(count as u64)
    }

    async fn count_by_campaign(&self) -> Result<Vec<GroupCount>, RepoError> {
        let records = self.records.read().await;
        Ok(group(records.iter().map(|s| Some(s.campaign.as_str()))))
    }

    async fn count_since(&self, since: DateTime<Utc>) -> Result<u64, RepoError> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|s| s.created_at >= since).count() as u64)
    }

    async fn daily_counts(&self, since: DateTime<Utc>) -> Result<Vec<GroupCount>, RepoError> {
        let records = self.records.read().await;
        let days: Vec<String> = records
            .iter()
            .filter(|s| s.created_at >= since)
            .map(|s| s.created_at.format("%Y-%m-%d").to_string())
            .collect();

        let mut grouped = group(days.iter().map(|d| Some(d.as_str())));
        grouped.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(grouped)
    }
}

#[async_trait]
impl CompetitionSubmissionRepository for InMemoryCompetitionSubmissionStore {
    async fn count_in(&self, campaign: &str) -> Result<u64, RepoError> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|s| s.campaign == campaign).count() as u64)
    }

    async fn recent(
        &self,
        campaign: &str,
        limit: u64,
    ) -> Result<Vec<CompetitionSubmission>, RepoError> {
        let records = self.records.read().await;
        let mut matching: Vec<CompetitionSubmission> = records
            .iter()
            .filter(|s| s.campaign == campaign)
            .cloned()
            .collect();

        matching.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        matching.truncate(limit as usize);
        Ok(matching)
    }
}

#[async_trait]
impl GoalpostBetaRepository for InMemoryGoalpostBetaStore {
    async fn count_for(&self, platform: Platform) -> Result<u64, RepoError> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|s| s.platform == platform).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn beta(email: &str, referrer: Option<&str>) -> BetaSignup {
        BetaSignup::new(
            email.to_string(),
            None,
            None,
            referrer.map(str::to_string),
            None,
        )
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = InMemoryBetaSignupStore::new();
        store.create(beta("a@b.co", None)).await.unwrap();

        let err = store.create(beta("a@b.co", None)).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(index) if index == "idx_beta_signups_email"));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_scoped_key_allows_other_campaign() {
        let store = InMemoryCompetitionSignupStore::new();
        store
            .create(CompetitionSignup::new("a@b.co".into(), "1k-subs".into()))
            .await
            .unwrap();
        store
            .create(CompetitionSignup::new("a@b.co".into(), "10k-subs".into()))
            .await
            .unwrap();

        assert_eq!(store.count_in(None).await.unwrap(), 2);
        assert_eq!(store.count_in(Some("1k-subs")).await.unwrap(), 1);
        assert!(
            store
                .create(CompetitionSignup::new("a@b.co".into(), "1k-subs".into()))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_concurrent_creates_admit_one() {
        let store = Arc::new(InMemoryGoalpostBetaStore::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create(GoalpostBetaSignup::new("a@b.co".into(), Platform::Ios))
                        .await
                        .is_ok()
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(store.count_for(Platform::Ios).await.unwrap(), 1);
        assert_eq!(store.count_for(Platform::Android).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_count_by_groups_missing_values() {
        let store = InMemoryBetaSignupStore::new();
        store.create(beta("a@b.co", Some("youtube"))).await.unwrap();
        store.create(beta("c@d.co", None)).await.unwrap();
        store.create(beta("e@f.co", Some("youtube"))).await.unwrap();

        let groups = store.count_by(BetaDimension::Referrer).await.unwrap();
        assert_eq!(
            groups,
            vec![
                GroupCount::new(Some("youtube".into()), 2),
                GroupCount::new(None, 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_recent_is_newest_first_and_bounded() {
        let store = InMemoryCompetitionSubmissionStore::new();
        for i in 0..5 {
            let mut submission = CompetitionSubmission::new(
                format!("user{i}@example.com"),
                "https://example.com".into(),
                None,
                None,
                "1k-subs-competition".into(),
            );
            submission.submitted_at = Utc::now() + chrono::Duration::seconds(i);
            store.create(submission).await.unwrap();
        }

        let recent = store.recent("1k-subs-competition", 3).await.unwrap();
        let emails: Vec<_> = recent.iter().map(|s| s.email.as_str()).collect();
        assert_eq!(
            emails,
            vec!["user4@example.com", "user3@example.com", "user2@example.com"]
        );
        assert!(store.recent("other", 10).await.unwrap().is_empty());
    }
}
