//! GoalPost beta signup entity for SeaORM.
//!
//! Unique on (email, platform) through
//! `idx_goalpost_beta_signups_email_platform`.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

/// Stored platform value; the table also carries a CHECK constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Platform {
    #[sea_orm(string_value = "ios")]
    Ios,
    #[sea_orm(string_value = "android")]
    Android,
}

impl From<signup_core::domain::Platform> for Platform {
    fn from(platform: signup_core::domain::Platform) -> Self {
        match platform {
            signup_core::domain::Platform::Ios => Platform::Ios,
            signup_core::domain::Platform::Android => Platform::Android,
        }
    }
}

impl From<Platform> for signup_core::domain::Platform {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::Ios => signup_core::domain::Platform::Ios,
            Platform::Android => signup_core::domain::Platform::Android,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "goalpost_beta_signups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub platform: Platform,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for signup_core::domain::GoalpostBetaSignup {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            platform: model.platform.into(),
            created_at: model.created_at.into(),
        }
    }
}

impl From<signup_core::domain::GoalpostBetaSignup> for ActiveModel {
    fn from(signup: signup_core::domain::GoalpostBetaSignup) -> Self {
        Self {
            id: Set(signup.id),
            email: Set(signup.email),
            platform: Set(signup.platform.into()),
            created_at: Set(signup.created_at.into()),
        }
    }
}
