mod add;
mod get;

use crate::StateTrait;
use axum::{
    routing::{get, post},
    Router,
};

/// Routes for team management
///
/// POST /team/add
/// GET  /team/get?team_name=
pub fn routes<S: StateTrait>() -> Router<S> {
    Router::new()
        .route("/add", post(add::add_team::<S>))
        .route("/get", get(get::get_team::<S>))
}
