use crate::{
    error::Result, extractors::ValidatedQuery, handlers::dto, service::MembershipRegistry, Json,
    StateTrait,
};
use axum::extract::State;
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct Query {
    #[validate(length(min = 1, max = 255))]
    team_name: String,
}

pub async fn get_team<S: StateTrait>(
    State(state): State<S>,
    ValidatedQuery(query): ValidatedQuery<Query>,
) -> Result<Json<dto::Team>> {
    let team = MembershipRegistry::new(state.storage())
        .get_team(&query.team_name)
        .await?;

    Ok(Json(team.into()))
}
