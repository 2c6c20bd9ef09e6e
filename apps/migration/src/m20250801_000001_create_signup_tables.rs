//! One table per signup form. Each table's unique index is the form's
//! duplicate key; inserts rely on it instead of checking first.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BetaSignups::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BetaSignups::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(BetaSignups::Email).string().not_null())
                    .col(ColumnDef::new(BetaSignups::Experience).string())
                    .col(ColumnDef::new(BetaSignups::Goal).string())
                    .col(ColumnDef::new(BetaSignups::Referrer).string())
                    .col(ColumnDef::new(BetaSignups::ReferrerOther).string())
                    .col(created_at(BetaSignups::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_beta_signups_email")
                    .table(BetaSignups::Table)
                    .col(BetaSignups::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CompetitionSignups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompetitionSignups::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CompetitionSignups::Email).string().not_null())
                    .col(
                        ColumnDef::new(CompetitionSignups::AcceptedRules)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CompetitionSignups::Campaign)
                            .string()
                            .not_null()
                            .default("1k-subs"),
                    )
                    .col(created_at(CompetitionSignups::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_competition_signups_email_campaign")
                    .table(CompetitionSignups::Table)
                    .col(CompetitionSignups::Email)
                    .col(CompetitionSignups::Campaign)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_competition_signups_created_at")
                    .table(CompetitionSignups::Table)
                    .col(CompetitionSignups::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CompetitionSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompetitionSubmissions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CompetitionSubmissions::Email)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CompetitionSubmissions::ProjectUrl)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CompetitionSubmissions::ProjectTitle).string_len(200))
                    .col(ColumnDef::new(CompetitionSubmissions::Description).string_len(1000))
                    .col(
                        ColumnDef::new(CompetitionSubmissions::Campaign)
                            .string()
                            .not_null()
                            .default("1k-subs-competition"),
                    )
                    .col(created_at(CompetitionSubmissions::SubmittedAt))
                    .col(created_at(CompetitionSubmissions::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_competition_submissions_email_campaign")
                    .table(CompetitionSubmissions::Table)
                    .col(CompetitionSubmissions::Email)
                    .col(CompetitionSubmissions::Campaign)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_competition_submissions_campaign_submitted_at")
                    .table(CompetitionSubmissions::Table)
                    .col(CompetitionSubmissions::Campaign)
                    .col(CompetitionSubmissions::SubmittedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GoalpostBetaSignups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GoalpostBetaSignups::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GoalpostBetaSignups::Email).string().not_null())
                    .col(
                        ColumnDef::new(GoalpostBetaSignups::Platform)
                            .string_len(16)
                            .not_null()
                            .check(Expr::col(GoalpostBetaSignups::Platform).is_in(["ios", "android"])),
                    )
                    .col(created_at(GoalpostBetaSignups::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_goalpost_beta_signups_email_platform")
                    .table(GoalpostBetaSignups::Table)
                    .col(GoalpostBetaSignups::Email)
                    .col(GoalpostBetaSignups::Platform)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GoalpostBetaSignups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CompetitionSubmissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CompetitionSignups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BetaSignups::Table).to_owned())
            .await
    }
}

fn created_at<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(DeriveIden)]
enum BetaSignups {
    Table,
    Id,
    Email,
    Experience,
    Goal,
    Referrer,
    ReferrerOther,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CompetitionSignups {
    Table,
    Id,
    Email,
    AcceptedRules,
    Campaign,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CompetitionSubmissions {
    Table,
    Id,
    Email,
    ProjectUrl,
    ProjectTitle,
    Description,
    Campaign,
    SubmittedAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum GoalpostBetaSignups {
    Table,
    Id,
    Email,
    Platform,
    CreatedAt,
}
