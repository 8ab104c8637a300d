mod dto;
mod pull_request;
mod stats;
mod team;
mod users;

use crate::state::StateTrait;
use axum::{extract::State, http::StatusCode, routing::get, Router};
use sea_orm::ConnectionTrait;

pub fn routes<S: StateTrait>() -> Router<S> {
    Router::new()
        .nest("/team", team::routes::<S>())
        .nest("/users", users::routes::<S>())
        .nest("/pullRequest", pull_request::routes::<S>())
        .route("/stats", get(stats::get_stats::<S>))
        .route("/livez", get(|| async {}))
        .route("/readyz", get(readiness::<S>))
}

async fn readiness<S: StateTrait>(State(state): State<S>) -> StatusCode {
    if let Err(error) = state.db().execute_unprepared("select 1").await {
        warn!("database is not reachable: {error}");
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    StatusCode::OK
}
