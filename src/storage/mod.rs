//! Persistence port used by the services.
//!
//! Every service is generic over [`Storage`], so the relational adapter in
//! [`db`] can be swapped without touching the domain rules. Operations that
//! must be atomic across several calls go through [`Storage::begin`], which
//! hands out a storage bound to one transaction; dropping it without calling
//! [`Transaction::commit`] rolls everything back.

mod db;

use crate::domain::{PullRequest, Stats, Team, User};
use async_trait::async_trait;
pub use db::DbStorage;
use sea_orm::DbErr;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error("conflicting write: {0}")]
    Conflict(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[async_trait]
pub trait Transaction: Storage + Sized {
    async fn commit(self) -> Result<()>;
}

#[async_trait]
pub trait Storage: Send + Sync {
    type Transaction: Transaction;

    async fn begin(&self) -> Result<Self::Transaction>;

    async fn team_exists(&self, name: &str) -> Result<bool>;
    /// Inserts the team row only. Members go through [`Storage::add_users`].
    async fn add_team(&self, name: &str) -> Result<Team>;
    /// Returns the team with all of its members, ordered by user id.
    async fn get_team(&self, name: &str) -> Result<Option<Team>>;

    async fn user_exists(&self, id: &str) -> Result<bool>;
    async fn get_user(&self, id: &str) -> Result<Option<User>>;
    async fn add_users(&self, members: &[User]) -> Result<()>;
    async fn set_user_active(&self, id: &str, is_active: bool) -> Result<Option<User>>;
    async fn get_users_by_team(&self, team_name: &str) -> Result<Vec<User>>;
    async fn get_active_users_by_team(&self, team_name: &str) -> Result<Vec<User>>;

    async fn pr_exists(&self, id: &str) -> Result<bool>;
    async fn create_pr(&self, pull_request: &PullRequest) -> Result<()>;
    /// Loads the pull request without its reviewers.
    async fn get_pr(&self, id: &str) -> Result<Option<PullRequest>>;
    /// Moves an open pull request to merged. Fails with [`Error::Conflict`]
    /// if the pull request is not open anymore.
    async fn merge_pr(&self, id: &str) -> Result<PullRequest>;

    async fn assign_reviewers(&self, pull_request_id: &str, reviewer_ids: &[String])
        -> Result<()>;
    async fn get_reviewers(&self, pull_request_id: &str) -> Result<Vec<User>>;
    async fn is_reviewer_assigned(&self, pull_request_id: &str, reviewer_id: &str)
        -> Result<bool>;
    /// Atomically swaps `old_reviewer_id` for `new_reviewer_id`. Fails with
    /// [`Error::Conflict`] if the old reviewer is no longer assigned or the new
    /// one already is.
    async fn reassign_reviewer(
        &self,
        pull_request_id: &str,
        new_reviewer_id: &str,
        old_reviewer_id: &str,
    ) -> Result<()>;
    async fn get_prs_reviewed_by(&self, user_id: &str) -> Result<Vec<PullRequest>>;

    async fn stats(&self) -> Result<Stats>;
}
