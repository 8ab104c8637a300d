use super::{Error, Result, Storage, Transaction};
use crate::{
    domain::{
        PullRequest, PullRequestStatus, ReviewerStats, Stats, Team, TeamStats, User, UserStats,
    },
    error::DatabaseError,
};
use async_trait::async_trait;
use chrono::Utc;
use entity::{pull_request_reviewers, pull_requests, teams, users};
use sea_orm::{
    sea_query::Expr, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseTransaction, DbErr,
    EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, TransactionTrait,
};

/// [`Storage`] backed by a sea-orm connection or transaction.
#[derive(Clone, Debug)]
pub struct DbStorage<C> {
    conn: C,
}

impl<C> DbStorage<C> {
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        User {
            id: model.id,
            username: model.username,
            team_name: model.team_name,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<pull_requests::Model> for PullRequest {
    fn from(model: pull_requests::Model) -> Self {
        PullRequest {
            id: model.id,
            name: model.name,
            author_id: model.author_id,
            status: model.status,
            reviewers: Vec::new(),
            created_at: model.created_at,
            merged_at: model.merged_at,
        }
    }
}

fn conflict_on_unique<T>(
    result: std::result::Result<T, DbErr>,
    message: impl FnOnce() -> String,
) -> Result<T> {
    result.map_err(|err| {
        if err.unique_violation() {
            Error::Conflict(message())
        } else {
            Error::Database(err)
        }
    })
}

#[derive(Debug, FromQueryResult)]
struct ActivityCount {
    is_active: bool,
    total: i64,
}

#[derive(Debug, FromQueryResult)]
struct TeamPullRequestCount {
    team_name: String,
    total: i64,
}

#[derive(Debug, FromQueryResult)]
struct ReviewerAssignmentCount {
    reviewer_id: String,
    is_active: bool,
    total: i64,
}

#[async_trait]
impl Transaction for DbStorage<DatabaseTransaction> {
    async fn commit(self) -> Result<()> {
        self.conn.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl<C> Storage for DbStorage<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    type Transaction = DbStorage<DatabaseTransaction>;

    async fn begin(&self) -> Result<Self::Transaction> {
        Ok(DbStorage::new(self.conn.begin().await?))
    }

    async fn team_exists(&self, name: &str) -> Result<bool> {
        let count = teams::Entity::find_by_id(name).count(&self.conn).await?;
        Ok(count > 0)
    }

    async fn add_team(&self, name: &str) -> Result<Team> {
        let now = Utc::now();

        let model = teams::ActiveModel {
            name: Set(name.to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = teams::Entity::insert(model)
            .exec_without_returning(&self.conn)
            .await;
        conflict_on_unique(result, || format!("team {name} already exists"))?;

        Ok(Team {
            name: name.to_owned(),
            members: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_team(&self, name: &str) -> Result<Option<Team>> {
        let Some(team) = teams::Entity::find_by_id(name).one(&self.conn).await? else {
            return Ok(None);
        };

        let members = self.get_users_by_team(&team.name).await?;

        Ok(Some(Team {
            name: team.name,
            members,
            created_at: team.created_at,
            updated_at: team.updated_at,
        }))
    }

    async fn user_exists(&self, id: &str) -> Result<bool> {
        let count = users::Entity::find_by_id(id).count(&self.conn).await?;
        Ok(count > 0)
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        let user = users::Entity::find_by_id(id).one(&self.conn).await?;
        Ok(user.map(User::from))
    }

    async fn add_users(&self, members: &[User]) -> Result<()> {
        if members.is_empty() {
            return Ok(());
        }

        let models = members.iter().map(|user| users::ActiveModel {
            id: Set(user.id.clone()),
            username: Set(user.username.clone()),
            team_name: Set(user.team_name.clone()),
            is_active: Set(user.is_active),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        });

        let result = users::Entity::insert_many(models)
            .exec_without_returning(&self.conn)
            .await;
        conflict_on_unique(result, || "user already exists".to_owned())?;

        Ok(())
    }

    async fn set_user_active(&self, id: &str, is_active: bool) -> Result<Option<User>> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::IsActive, Expr::value(is_active))
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_user(id).await
    }

    async fn get_users_by_team(&self, team_name: &str) -> Result<Vec<User>> {
        let members = users::Entity::find_in_team(team_name)
            .all(&self.conn)
            .await?;

        Ok(members.into_iter().map(User::from).collect())
    }

    async fn get_active_users_by_team(&self, team_name: &str) -> Result<Vec<User>> {
        let members = users::Entity::find_active_in_team(team_name)
            .all(&self.conn)
            .await?;

        Ok(members.into_iter().map(User::from).collect())
    }

    async fn pr_exists(&self, id: &str) -> Result<bool> {
        let count = pull_requests::Entity::find_by_id(id)
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }

    async fn create_pr(&self, pull_request: &PullRequest) -> Result<()> {
        let model = pull_requests::ActiveModel {
            id: Set(pull_request.id.clone()),
            name: Set(pull_request.name.clone()),
            author_id: Set(pull_request.author_id.clone()),
            status: Set(pull_request.status),
            created_at: Set(pull_request.created_at),
            merged_at: Set(pull_request.merged_at),
        };

        let result = pull_requests::Entity::insert(model)
            .exec_without_returning(&self.conn)
            .await;
        conflict_on_unique(result, || {
            format!("pull request {} already exists", pull_request.id)
        })?;

        Ok(())
    }

    async fn get_pr(&self, id: &str) -> Result<Option<PullRequest>> {
        let pull_request = pull_requests::Entity::find_by_id(id)
            .one(&self.conn)
            .await?;

        Ok(pull_request.map(PullRequest::from))
    }

    async fn merge_pr(&self, id: &str) -> Result<PullRequest> {
        let result = pull_requests::Entity::update_many()
            .col_expr(
                pull_requests::Column::Status,
                Expr::value(PullRequestStatus::Merged),
            )
            .col_expr(pull_requests::Column::MergedAt, Expr::value(Utc::now()))
            .filter(pull_requests::Column::Id.eq(id))
            .filter(pull_requests::Column::Status.eq(PullRequestStatus::Open))
            .exec(&self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::Conflict(format!("pull request {id} is not open")));
        }

        self.get_pr(id)
            .await?
            .ok_or_else(|| Error::Conflict(format!("pull request {id} disappeared")))
    }

    async fn assign_reviewers(
        &self,
        pull_request_id: &str,
        reviewer_ids: &[String],
    ) -> Result<()> {
        if reviewer_ids.is_empty() {
            return Ok(());
        }

        let models = reviewer_ids
            .iter()
            .map(|reviewer_id| pull_request_reviewers::ActiveModel {
                pull_request_id: Set(pull_request_id.to_owned()),
                reviewer_id: Set(reviewer_id.clone()),
            });

        let result = pull_request_reviewers::Entity::insert_many(models)
            .exec_without_returning(&self.conn)
            .await;
        conflict_on_unique(result, || {
            format!("reviewer already assigned to pull request {pull_request_id}")
        })?;

        Ok(())
    }

    async fn get_reviewers(&self, pull_request_id: &str) -> Result<Vec<User>> {
        let reviewers = users::Entity::find()
            .join(
                JoinType::InnerJoin,
                pull_request_reviewers::Relation::Reviewer.def().rev(),
            )
            .filter(pull_request_reviewers::Column::PullRequestId.eq(pull_request_id))
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(reviewers.into_iter().map(User::from).collect())
    }

    async fn is_reviewer_assigned(
        &self,
        pull_request_id: &str,
        reviewer_id: &str,
    ) -> Result<bool> {
        let count = pull_request_reviewers::Entity::find_by_id((
            pull_request_id.to_owned(),
            reviewer_id.to_owned(),
        ))
        .count(&self.conn)
        .await?;

        Ok(count > 0)
    }

    async fn reassign_reviewer(
        &self,
        pull_request_id: &str,
        new_reviewer_id: &str,
        old_reviewer_id: &str,
    ) -> Result<()> {
        let txn = self.conn.begin().await?;

        let result = pull_request_reviewers::Entity::update_many()
            .col_expr(
                pull_request_reviewers::Column::ReviewerId,
                Expr::value(new_reviewer_id),
            )
            .filter(pull_request_reviewers::Column::PullRequestId.eq(pull_request_id))
            .filter(pull_request_reviewers::Column::ReviewerId.eq(old_reviewer_id))
            .exec(&txn)
            .await;

        let result = conflict_on_unique(result, || {
            format!("{new_reviewer_id} is already reviewing pull request {pull_request_id}")
        })?;

        if result.rows_affected == 0 {
            return Err(Error::Conflict(format!(
                "{old_reviewer_id} is no longer reviewing pull request {pull_request_id}"
            )));
        }

        txn.commit().await?;

        Ok(())
    }

    async fn get_prs_reviewed_by(&self, user_id: &str) -> Result<Vec<PullRequest>> {
        let pull_requests = pull_requests::Entity::find()
            .join(
                JoinType::InnerJoin,
                pull_request_reviewers::Relation::PullRequest.def().rev(),
            )
            .filter(pull_request_reviewers::Column::ReviewerId.eq(user_id))
            .order_by_asc(pull_requests::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(pull_requests.into_iter().map(PullRequest::from).collect())
    }

    async fn stats(&self) -> Result<Stats> {
        let activity = users::Entity::find()
            .select_only()
            .column(users::Column::IsActive)
            .column_as(Expr::col(users::Column::Id).count(), "total")
            .group_by(users::Column::IsActive)
            .into_model::<ActivityCount>()
            .all(&self.conn)
            .await?;

        let mut user_stats = UserStats::default();
        for row in activity {
            user_stats.total += row.total;
            if row.is_active {
                user_stats.active += row.total;
            } else {
                user_stats.inactive += row.total;
            }
        }

        let teams = teams::Entity::find()
            .select_only()
            .column_as(teams::Column::Name, "team_name")
            .column_as(
                Expr::col((pull_requests::Entity, pull_requests::Column::Id)).count(),
                "total",
            )
            .join(JoinType::LeftJoin, users::Relation::Team.def().rev())
            .join(JoinType::LeftJoin, pull_requests::Relation::Author.def().rev())
            .group_by(teams::Column::Name)
            .order_by_asc(teams::Column::Name)
            .into_model::<TeamPullRequestCount>()
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|row| TeamStats {
                team_name: row.team_name,
                pull_requests: row.total,
            })
            .collect();

        let reviewers = pull_request_reviewers::Entity::find()
            .select_only()
            .column(pull_request_reviewers::Column::ReviewerId)
            .column(users::Column::IsActive)
            .column_as(
                Expr::col((
                    pull_request_reviewers::Entity,
                    pull_request_reviewers::Column::PullRequestId,
                ))
                .count(),
                "total",
            )
            .join(
                JoinType::InnerJoin,
                pull_request_reviewers::Relation::Reviewer.def(),
            )
            .group_by(pull_request_reviewers::Column::ReviewerId)
            .group_by(users::Column::IsActive)
            .order_by_asc(pull_request_reviewers::Column::ReviewerId)
            .into_model::<ReviewerAssignmentCount>()
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|row| ReviewerStats {
                user_id: row.reviewer_id,
                is_active: row.is_active,
                assignments: row.total,
            })
            .collect();

        Ok(Stats {
            users: user_stats,
            teams,
            reviewers,
        })
    }
}
