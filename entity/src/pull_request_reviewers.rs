use super::{pull_requests, users};
use sea_orm::entity::prelude::*;

pub mod constraints {
    pub const PK_PULL_REQUEST_REVIEWERS: &str = "PK_pull_request_reviewers";
    pub const FK_PULL_REQUEST_REVIEWERS_PULL_REQUEST_ID: &str =
        "FK_pull_request_reviewers_pull_request_id";
    pub const FK_PULL_REQUEST_REVIEWERS_REVIEWER_ID: &str = "FK_pull_request_reviewers_reviewer_id";
    pub const IDX_PULL_REQUEST_REVIEWERS_REVIEWER_ID: &str =
        "IDX_pull_request_reviewers_reviewer_id";
}

/// One row per (pull request, reviewer) pair. The composite primary key keeps
/// a reviewer from being assigned twice to the same pull request.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pull_request_reviewers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub pull_request_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub reviewer_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    PullRequest,
    Reviewer,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::PullRequest => Entity::belongs_to(pull_requests::Entity)
                .from(Column::PullRequestId)
                .to(pull_requests::Column::Id)
                .into(),
            Self::Reviewer => Entity::belongs_to(users::Entity)
                .from(Column::ReviewerId)
                .to(users::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
