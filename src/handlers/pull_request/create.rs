use crate::{
    domain::NewPullRequest, error::Result, handlers::dto, service::PullRequestLifecycle, Json,
    StateTrait, ValidatedJson,
};
use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct Request {
    #[validate(length(min = 1, max = 255))]
    pull_request_id: String,
    #[validate(length(min = 1, max = 255))]
    pull_request_name: String,
    #[validate(length(min = 1, max = 255))]
    author_id: String,
}

#[derive(Serialize)]
pub struct Response {
    pr: dto::PullRequest,
}

pub async fn create_pull_request<S: StateTrait>(
    State(state): State<S>,
    ValidatedJson(request): ValidatedJson<Request>,
) -> Result<(StatusCode, Json<Response>)> {
    let new = NewPullRequest {
        id: request.pull_request_id,
        name: request.pull_request_name,
        author_id: request.author_id,
    };

    let pull_request = PullRequestLifecycle::new(state.storage())
        .create(new, &mut state.rng())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Response {
            pr: pull_request.into(),
        }),
    ))
}
