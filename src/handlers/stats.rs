use crate::{domain, error::Result, service, Json, StateTrait};
use axum::extract::State;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct UserStats {
    total: i64,
    active: i64,
    inactive: i64,
}

#[derive(Debug, Serialize)]
struct TeamStats {
    team_name: String,
    pull_requests: i64,
}

#[derive(Debug, Serialize)]
struct ReviewerStats {
    user_id: String,
    is_active: bool,
    assigned_pull_requests: i64,
}

#[derive(Debug, Serialize)]
pub struct Response {
    users: UserStats,
    teams: Vec<TeamStats>,
    reviewers: Vec<ReviewerStats>,
}

impl From<domain::Stats> for Response {
    fn from(stats: domain::Stats) -> Self {
        Response {
            users: UserStats {
                total: stats.users.total,
                active: stats.users.active,
                inactive: stats.users.inactive,
            },
            teams: stats
                .teams
                .into_iter()
                .map(|team| TeamStats {
                    team_name: team.team_name,
                    pull_requests: team.pull_requests,
                })
                .collect(),
            reviewers: stats
                .reviewers
                .into_iter()
                .map(|reviewer| ReviewerStats {
                    user_id: reviewer.user_id,
                    is_active: reviewer.is_active,
                    assigned_pull_requests: reviewer.assignments,
                })
                .collect(),
        }
    }
}

pub async fn get_stats<S: StateTrait>(State(state): State<S>) -> Result<Json<Response>> {
    let stats = service::collect_stats(&state.storage()).await?;
    Ok(Json(stats.into()))
}
