use entity::{
    teams,
    users::{self, constraints::*},
};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(users::Entity)
                    .if_not_exists()
                    .col(ColumnDef::new(users::Column::Id).string_len(255).not_null())
                    .col(
                        ColumnDef::new(users::Column::Username)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(users::Column::TeamName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(users::Column::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(users::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(users::Column::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(Index::create().name(PK_USERS).col(users::Column::Id))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_USERS_TEAM_NAME)
                            .from(users::Entity, users::Column::TeamName)
                            .to(teams::Entity, teams::Column::Name)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // reviewer candidates are always looked up by (team, active)
        manager
            .create_index(
                Index::create()
                    .name(IDX_USERS_TEAM_NAME_IS_ACTIVE)
                    .table(users::Entity)
                    .col(users::Column::TeamName)
                    .col(users::Column::IsActive)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(users::Entity).to_owned())
            .await
    }
}
