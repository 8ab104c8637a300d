use crate::{
    error::Result, handlers::dto, service::AssignmentEngine, Json, StateTrait, ValidatedJson,
};
use axum::extract::State;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct Request {
    #[validate(length(min = 1, max = 255))]
    pull_request_id: String,
    #[validate(length(min = 1, max = 255))]
    old_user_id: String,
}

#[derive(Serialize)]
pub struct Response {
    pr: dto::PullRequest,
    replaced_by: String,
}

pub async fn reassign_reviewer<S: StateTrait>(
    State(state): State<S>,
    ValidatedJson(request): ValidatedJson<Request>,
) -> Result<Json<Response>> {
    let (pull_request, replaced_by) = AssignmentEngine::new(state.storage())
        .reassign_reviewer(&request.pull_request_id, &request.old_user_id)
        .await?;

    Ok(Json(Response {
        pr: pull_request.into(),
        replaced_by,
    }))
}
