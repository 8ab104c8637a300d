use entity::{
    pull_request_reviewers::{self, constraints::*},
    pull_requests, users,
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
                    .table(pull_request_reviewers::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(pull_request_reviewers::Column::PullRequestId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(pull_request_reviewers::Column::ReviewerId)
                            .string_len(255)
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name(PK_PULL_REQUEST_REVIEWERS)
                            .col(pull_request_reviewers::Column::PullRequestId)
                            .col(pull_request_reviewers::Column::ReviewerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_PULL_REQUEST_REVIEWERS_PULL_REQUEST_ID)
                            .from(
                                pull_request_reviewers::Entity,
                                pull_request_reviewers::Column::PullRequestId,
                            )
                            .to(pull_requests::Entity, pull_requests::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_PULL_REQUEST_REVIEWERS_REVIEWER_ID)
                            .from(
                                pull_request_reviewers::Entity,
                                pull_request_reviewers::Column::ReviewerId,
                            )
                            .to(users::Entity, users::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PULL_REQUEST_REVIEWERS_REVIEWER_ID)
                    .table(pull_request_reviewers::Entity)
                    .col(pull_request_reviewers::Column::ReviewerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(pull_request_reviewers::Entity).to_owned())
            .await
    }
}
