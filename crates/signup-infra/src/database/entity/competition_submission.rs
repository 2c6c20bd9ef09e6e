//! Competition submission entity for SeaORM.
//!
//! Unique on (email, campaign) through
//! `idx_competition_submissions_email_campaign`.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "competition_submissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub project_url: String,
    #[sea_orm(column_type = "String(StringLen::N(200))", nullable)]
    pub project_title: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(1000))", nullable)]
    pub description: Option<String>,
    pub campaign: String,
    pub submitted_at: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for signup_core::domain::CompetitionSubmission {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            project_url: model.project_url,
            project_title: model.project_title,
            description: model.description,
            campaign: model.campaign,
            submitted_at: model.submitted_at.into(),
            created_at: model.created_at.into(),
        }
    }
}

impl From<signup_core::domain::CompetitionSubmission> for ActiveModel {
    fn from(submission: signup_core::domain::CompetitionSubmission) -> Self {
        Self {
            id: Set(submission.id),
            email: Set(submission.email),
            project_url: Set(submission.project_url),
            project_title: Set(submission.project_title),
            description: Set(submission.description),
            campaign: Set(submission.campaign),
            submitted_at: Set(submission.submitted_at.into()),
            created_at: Set(submission.created_at.into()),
        }
    }
}
