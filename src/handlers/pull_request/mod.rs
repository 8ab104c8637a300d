mod create;
mod merge;
mod reassign;

use crate::StateTrait;
use axum::{routing::post, Router};

/// Routes for pull requests
///
/// POST /pullRequest/create
/// POST /pullRequest/merge
/// POST /pullRequest/reassign
pub fn routes<S: StateTrait>() -> Router<S> {
    Router::new()
        .route("/create", post(create::create_pull_request::<S>))
        .route("/merge", post(merge::merge_pull_request::<S>))
        .route("/reassign", post(reassign::reassign_reviewer::<S>))
}
