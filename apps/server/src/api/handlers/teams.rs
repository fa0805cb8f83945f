//! Team endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use review_core::models::{Team, User};

use crate::error::{ApiError, ApiJson, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct TeamDto {
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub members: Vec<MemberDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MemberDto {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub is_active: bool,
}

impl TeamDto {
    fn into_team(self) -> Team {
        let team_name = self.team_name;
        let members = self
            .members
            .into_iter()
            .map(|m| User {
                id: m.user_id,
                username: m.username,
                team_name: team_name.clone(),
                is_active: m.is_active,
            })
            .collect();
        Team {
            name: team_name,
            members,
        }
    }

    fn from_team(team: Team) -> Self {
        Self {
            team_name: team.name,
            members: team
                .members
                .into_iter()
                .map(|u| MemberDto {
                    user_id: u.id,
                    username: u.username,
                    is_active: u.is_active,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddTeamResponse {
    pub team: TeamDto,
}

pub async fn add_team(
    State(state): State<AppState>,
    ApiJson(team): ApiJson<TeamDto>,
) -> ApiResult<Response> {
    if team.team_name.is_empty() {
        return Err(ApiError::invalid("team_name is required"));
    }

    let created = state.team_service.create_team(team.into_team()).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddTeamResponse {
            team: TeamDto::from_team(created),
        }),
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct GetTeamParams {
    #[serde(default)]
    pub team_name: String,
}

pub async fn get_team(
    State(state): State<AppState>,
    Query(params): Query<GetTeamParams>,
) -> ApiResult<Response> {
    if params.team_name.is_empty() {
        return Err(ApiError::invalid("team_name param is required"));
    }

    let team = state.team_service.get_team(&params.team_name).await?;

    Ok((StatusCode::OK, Json(TeamDto::from_team(team))).into_response())
}
