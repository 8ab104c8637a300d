use crate::{
    domain::{NewMember, NewTeam},
    error::Result,
    handlers::dto,
    service::MembershipRegistry,
    Json, StateTrait, ValidatedJson,
};
use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct Member {
    #[validate(length(min = 1, max = 255))]
    user_id: String,
    #[validate(length(min = 1, max = 255))]
    username: String,
    is_active: bool,
}

#[derive(Deserialize, Validate)]
pub struct Request {
    #[validate(length(min = 1, max = 255))]
    team_name: String,
    #[validate(nested)]
    members: Vec<Member>,
}

#[derive(Serialize)]
pub struct Response {
    team: dto::Team,
}

pub async fn add_team<S: StateTrait>(
    State(state): State<S>,
    ValidatedJson(request): ValidatedJson<Request>,
) -> Result<(StatusCode, Json<Response>)> {
    let team = NewTeam {
        name: request.team_name,
        members: request
            .members
            .into_iter()
            .map(|member| NewMember {
                id: member.user_id,
                username: member.username,
                is_active: member.is_active,
            })
            .collect(),
    };

    let team = MembershipRegistry::new(state.storage())
        .add_team(team)
        .await?;

    Ok((StatusCode::CREATED, Json(Response { team: team.into() })))
}
