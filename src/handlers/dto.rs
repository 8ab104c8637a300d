use crate::domain::{self, PullRequestStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TeamMember {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct Team {
    pub team_name: String,
    pub members: Vec<TeamMember>,
}

#[derive(Debug, Serialize)]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct PullRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
    pub assigned_reviewers: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "mergedAt")]
    pub merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct PullRequestShort {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
}

impl From<domain::Team> for Team {
    fn from(team: domain::Team) -> Self {
        Team {
            team_name: team.name,
            members: team
                .members
                .into_iter()
                .map(|member| TeamMember {
                    user_id: member.id,
                    username: member.username,
                    is_active: member.is_active,
                })
                .collect(),
        }
    }
}

impl From<domain::User> for User {
    fn from(user: domain::User) -> Self {
        User {
            user_id: user.id,
            username: user.username,
            team_name: user.team_name,
            is_active: user.is_active,
        }
    }
}

impl From<domain::PullRequest> for PullRequest {
    fn from(pull_request: domain::PullRequest) -> Self {
        PullRequest {
            assigned_reviewers: pull_request.reviewer_ids().map(str::to_owned).collect(),
            pull_request_id: pull_request.id,
            pull_request_name: pull_request.name,
            author_id: pull_request.author_id,
            status: pull_request.status,
            created_at: pull_request.created_at,
            merged_at: pull_request.merged_at,
        }
    }
}

impl From<domain::PullRequest> for PullRequestShort {
    fn from(pull_request: domain::PullRequest) -> Self {
        PullRequestShort {
            pull_request_id: pull_request.id,
            pull_request_name: pull_request.name,
            author_id: pull_request.author_id,
            status: pull_request.status,
        }
    }
}
