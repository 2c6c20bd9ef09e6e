//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use signup_core::domain::{BetaDimension, CompetitionSubmission, GroupCount, Platform};
use signup_core::error::RepoError;
use signup_core::ports::{
    BetaSignupRepository, CompetitionSignupRepository, CompetitionSubmissionRepository,
    GoalpostBetaRepository,
};

use super::entity::beta_signup::{self, Entity as BetaSignupEntity};
use super::entity::competition_signup::{self, Entity as CompetitionSignupEntity};
use super::entity::competition_submission::{self, Entity as CompetitionSubmissionEntity};
use super::entity::goalpost_beta_signup::{self, Entity as GoalpostBetaEntity};
use super::postgres_base::{PostgresRecordStore, map_db_err};

/// PostgreSQL beta signup store.
pub type PostgresBetaSignupStore = PostgresRecordStore<BetaSignupEntity>;

/// PostgreSQL competition signup store.
pub type PostgresCompetitionSignupStore = PostgresRecordStore<CompetitionSignupEntity>;

/// PostgreSQL competition submission store.
pub type PostgresCompetitionSubmissionStore = PostgresRecordStore<CompetitionSubmissionEntity>;

/// PostgreSQL GoalPost beta store.
pub type PostgresGoalpostBetaStore = PostgresRecordStore<GoalpostBetaEntity>;

const DAY_BUCKET: &str = "to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD')";

/// Row shape of every `GROUP BY` query below.
#[derive(Debug, FromQueryResult)]
struct GroupRow {
    key: Option<String>,
    count: i64,
}

impl From<GroupRow> for GroupCount {
    fn from(row: GroupRow) -> Self {
        GroupCount::new(row.key, row.count.max(0) as u64)
    }
}

#[async_trait]
impl BetaSignupRepository for PostgresBetaSignupStore {
    async fn count_by(&self, dimension: BetaDimension) -> Result<Vec<GroupCount>, RepoError> {
        let column = match dimension {
            BetaDimension::Referrer => beta_signup::Column::Referrer,
            BetaDimension::Experience => beta_signup::Column::Experience,
            BetaDimension::Goal => beta_signup::Column::Goal,
        };

        let rows = BetaSignupEntity::find()
            .select_only()
            .column_as(column, "key")
            .column_as(beta_signup::Column::Id.count(), "count")
            .group_by(column)
            .into_model::<GroupRow>()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(GroupCount::rank(rows.into_iter().map(Into::into).collect()))
    }
}

#[async_trait]
impl CompetitionSignupRepository for PostgresCompetitionSignupStore {
    async fn count_in(&self, campaign: Option<&str>) -> Result<u64, RepoError> {
        let mut query = CompetitionSignupEntity::find();
        if let Some(campaign) = campaign {
            query = query.filter(competition_signup::Column::Campaign.eq(campaign));
        }
        query.count(&self.db).await.map_err(map_db_err)
    }

    async fn count_by_campaign(&self) -> Result<Vec<GroupCount>, RepoError> {
        let rows = CompetitionSignupEntity::find()
            .select_only()
            .column_as(competition_signup::Column::Campaign, "key")
            .column_as(competition_signup::Column::Id.count(), "count")
            .group_by(competition_signup::Column::Campaign)
            .into_model::<GroupRow>()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(GroupCount::rank(rows.into_iter().map(Into::into).collect()))
    }

    async fn count_since(&self, since: DateTime<Utc>) -> Result<u64, RepoError> {
        CompetitionSignupEntity::find()
            .filter(competition_signup::Column::CreatedAt.gte(since))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn daily_counts(&self, since: DateTime<Utc>) -> Result<Vec<GroupCount>, RepoError> {
        let rows = CompetitionSignupEntity::find()
            .select_only()
            .column_as(Expr::cust(DAY_BUCKET), "key")
            .column_as(competition_signup::Column::Id.count(), "count")
            .filter(competition_signup::Column::CreatedAt.gte(since))
            .group_by(Expr::cust(DAY_BUCKET))
            .into_model::<GroupRow>()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let mut days: Vec<GroupCount> = rows.into_iter().map(Into::into).collect();
        days.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(days)
    }
}

#[async_trait]
impl CompetitionSubmissionRepository for PostgresCompetitionSubmissionStore {
    async fn count_in(&self, campaign: &str) -> Result<u64, RepoError> {
        CompetitionSubmissionEntity::find()
            .filter(competition_submission::Column::Campaign.eq(campaign))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn recent(
        &self,
        campaign: &str,
        limit: u64,
    ) -> Result<Vec<CompetitionSubmission>, RepoError> {
        let result = CompetitionSubmissionEntity::find()
            .filter(competition_submission::Column::Campaign.eq(campaign))
            .order_by_desc(competition_submission::Column::SubmittedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl GoalpostBetaRepository for PostgresGoalpostBetaStore {
    async fn count_for(&self, platform: Platform) -> Result<u64, RepoError> {
        GoalpostBetaEntity::find()
            .filter(
                goalpost_beta_signup::Column::Platform
                    .eq(goalpost_beta_signup::Platform::from(platform)),
            )
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}
