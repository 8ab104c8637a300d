//! Plain domain records shared by the services and the storage port.

use chrono::{DateTime, Utc};
pub use entity::pull_requests::Status as PullRequestStatus;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    pub members: Vec<User>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A pull request together with its current reviewer set. The reviewer list
/// is empty on records coming from listing queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PullRequest {
    pub id: String,
    pub name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
    pub reviewers: Vec<User>,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    #[inline]
    pub fn is_merged(&self) -> bool {
        self.status == PullRequestStatus::Merged
    }

    pub fn reviewer_ids(&self) -> impl Iterator<Item = &str> {
        self.reviewers.iter().map(|reviewer| reviewer.id.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct NewMember {
    pub id: String,
    pub username: String,
    pub is_active: bool,
}

#[derive(Clone, Debug)]
pub struct NewTeam {
    pub name: String,
    pub members: Vec<NewMember>,
}

#[derive(Clone, Debug)]
pub struct NewPullRequest {
    pub id: String,
    pub name: String,
    pub author_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub users: UserStats,
    pub teams: Vec<TeamStats>,
    pub reviewers: Vec<ReviewerStats>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserStats {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamStats {
    pub team_name: String,
    pub pull_requests: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewerStats {
    pub user_id: String,
    pub is_active: bool,
    pub assignments: i64,
}
