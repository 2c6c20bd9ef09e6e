#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr, Value};

    use crate::database::entity::{beta_signup, competition_submission, goalpost_beta_signup};
    use crate::database::postgres_repo::{
        PostgresBetaSignupStore, PostgresCompetitionSubmissionStore, PostgresGoalpostBetaStore,
    };
    use signup_core::domain::{BetaDimension, BetaSignup, GroupCount, Platform};
    use signup_core::error::RepoError;
    use signup_core::ports::{
        BetaSignupRepository, CompetitionSubmissionRepository, GoalpostBetaRepository,
        RecordStore,
    };

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
    }

    fn group_row(key: Option<&str>, count: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("key", Value::String(key.map(|k| Box::new(k.to_string())))),
            ("count", Value::BigInt(Some(count))),
        ])
    }

    #[tokio::test]
    async fn test_create_beta_signup() {
        let signup = BetaSignup::new(
            "dev@example.com".to_string(),
            Some("senior".to_string()),
            None,
            Some("youtube".to_string()),
            None,
        );

        // Mock the INSERT ... RETURNING row
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[beta_signup::Model {
                id: signup.id,
                email: signup.email.clone(),
                experience: signup.experience.clone(),
                goal: None,
                referrer: signup.referrer.clone(),
                referrer_other: None,
                created_at: signup.created_at.into(),
            }]])
            .into_connection();

        let repo = PostgresBetaSignupStore::new(db);
        let created = repo.create(signup.clone()).await.unwrap();

        assert_eq!(created.id, signup.id);
        assert_eq!(created.email, "dev@example.com");
        assert_eq!(created.referrer.as_deref(), Some("youtube"));
    }

    #[tokio::test]
    async fn test_unique_violation_maps_to_duplicate() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Query(RuntimeErr::Internal(
                "duplicate key value violates unique constraint \"idx_beta_signups_email\""
                    .to_string(),
            ))])
            .into_connection();

        let repo = PostgresBetaSignupStore::new(db);
        let err = repo
            .create(BetaSignup::new(
                "dev@example.com".to_string(),
                None,
                None,
                None,
                None,
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_other_failures_map_to_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Query(RuntimeErr::Internal(
                "relation \"beta_signups\" does not exist".to_string(),
            ))])
            .into_connection();

        let repo = PostgresBetaSignupStore::new(db);
        let err = RecordStore::<BetaSignup>::count(&repo).await.unwrap_err();

        assert!(matches!(err, RepoError::Query(_)));
    }

    #[tokio::test]
    async fn test_count_for_platform() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[count_row(3)]])
            .into_connection();

        let repo = PostgresGoalpostBetaStore::new(db);
        assert_eq!(repo.count_for(Platform::Android).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_count_by_ranks_groups() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[
                group_row(Some("twitter"), 1),
                group_row(None, 4),
                group_row(Some("youtube"), 2),
            ]])
            .into_connection();

        let repo = PostgresBetaSignupStore::new(db);
        let groups = repo.count_by(BetaDimension::Referrer).await.unwrap();

        assert_eq!(
            groups,
            vec![
                GroupCount::new(None, 4),
                GroupCount::new(Some("youtube".into()), 2),
                GroupCount::new(Some("twitter".into()), 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_recent_submissions() {
        let now = chrono::Utc::now();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[competition_submission::Model {
                id: uuid::Uuid::new_v4(),
                email: "maker@example.com".to_owned(),
                project_url: "https://example.com".to_owned(),
                project_title: Some("Demo".to_owned()),
                description: None,
                campaign: "1k-subs-competition".to_owned(),
                submitted_at: now.into(),
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresCompetitionSubmissionStore::new(db);
        let recent = repo.recent("1k-subs-competition", 10).await.unwrap();

        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].project_title.as_deref(), Some("Demo"));
    }

    #[test]
    fn test_platform_column_round_trips() {
        let stored = goalpost_beta_signup::Platform::from(Platform::Ios);
        assert_eq!(Platform::from(stored), Platform::Ios);
    }
}
