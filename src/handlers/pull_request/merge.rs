use crate::{
    error::Result, handlers::dto, service::PullRequestLifecycle, Json, StateTrait, ValidatedJson,
};
use axum::extract::State;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct Request {
    #[validate(length(min = 1, max = 255))]
    pull_request_id: String,
}

#[derive(Serialize)]
pub struct Response {
    pr: dto::PullRequest,
}

pub async fn merge_pull_request<S: StateTrait>(
    State(state): State<S>,
    ValidatedJson(request): ValidatedJson<Request>,
) -> Result<Json<Response>> {
    let pull_request = PullRequestLifecycle::new(state.storage())
        .merge(&request.pull_request_id)
        .await?;

    Ok(Json(Response {
        pr: pull_request.into(),
    }))
}
