//! Create dashboard_user table migration

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DashboardUser::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DashboardUser::Id)
                            .string_len(128)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DashboardUser::UserName)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(DashboardUser::Password)
                            .string_len(128)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(DashboardUser::Role)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(DashboardUser::Enabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(DashboardUser::DateCreated)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DashboardUser::DateUpdated)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing pages are ordered by creation time
        manager
            .create_index(
                Index::create()
                    .name("idx_dashboard_user_date_created")
                    .table(DashboardUser::Table)
                    .col(DashboardUser::DateCreated)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DashboardUser::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum DashboardUser {
    Table,
    Id,
    UserName,
    Password,
    Role,
    Enabled,
    DateCreated,
    DateUpdated,
}
