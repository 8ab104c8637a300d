use crate::{
    error::Result, handlers::dto, service::MembershipRegistry, Json, StateTrait, ValidatedJson,
};
use axum::extract::State;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct Request {
    #[validate(length(min = 1, max = 255))]
    user_id: String,
    is_active: bool,
}

#[derive(Serialize)]
pub struct Response {
    user: dto::User,
}

pub async fn set_is_active<S: StateTrait>(
    State(state): State<S>,
    ValidatedJson(request): ValidatedJson<Request>,
) -> Result<Json<Response>> {
    let user = MembershipRegistry::new(state.storage())
        .set_user_active(&request.user_id, request.is_active)
        .await?;

    Ok(Json(Response { user: user.into() }))
}
