//! Competition signup entity for SeaORM.
//!
//! Unique on (email, campaign) through `idx_competition_signups_email_campaign`.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "competition_signups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub accepted_rules: bool,
    pub campaign: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for signup_core::domain::CompetitionSignup {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            accepted_rules: model.accepted_rules,
            campaign: model.campaign,
            created_at: model.created_at.into(),
        }
    }
}

impl From<signup_core::domain::CompetitionSignup> for ActiveModel {
    fn from(signup: signup_core::domain::CompetitionSignup) -> Self {
        Self {
            id: Set(signup.id),
            email: Set(signup.email),
            accepted_rules: Set(signup.accepted_rules),
            campaign: Set(signup.campaign),
            created_at: Set(signup.created_at.into()),
        }
    }
}
