//! Beta signup entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "beta_signups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub experience: Option<String>,
    pub goal: Option<String>,
    pub referrer: Option<String>,
    pub referrer_other: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for signup_core::domain::BetaSignup {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            experience: model.experience,
            goal: model.goal,
            referrer: model.referrer,
            referrer_other: model.referrer_other,
            created_at: model.created_at.into(),
        }
    }
}

impl From<signup_core::domain::BetaSignup> for ActiveModel {
    fn from(signup: signup_core::domain::BetaSignup) -> Self {
        Self {
            id: Set(signup.id),
            email: Set(signup.email),
            experience: Set(signup.experience),
            goal: Set(signup.goal),
            referrer: Set(signup.referrer),
            referrer_other: Set(signup.referrer_other),
            created_at: Set(signup.created_at.into()),
        }
    }
}
