//! User endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use review_core::models::{PullRequest, PullRequestStatus, User};

use crate::error::{ApiError, ApiJson, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetUserActiveRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            team_name: user.team_name,
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SetUserActiveResponse {
    pub user: UserDto,
}

pub async fn set_user_active(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SetUserActiveRequest>,
) -> ApiResult<Response> {
    if req.user_id.is_empty() {
        return Err(ApiError::invalid("user_id is required"));
    }

    let user = state
        .user_service
        .set_user_active(&req.user_id, req.is_active)
        .await?;

    Ok((
        StatusCode::OK,
        Json(SetUserActiveResponse { user: user.into() }),
    )
        .into_response())
}

#[derive(Debug, Serialize)]
pub struct PullRequestShortDto {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
}

impl From<PullRequest> for PullRequestShortDto {
    fn from(pr: PullRequest) -> Self {
        Self {
            pull_request_id: pr.id,
            pull_request_name: pr.name,
            author_id: pr.author_id,
            status: pr.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserReviewResponse {
    pub user_id: String,
    pub pull_requests: Vec<PullRequestShortDto>,
}

#[derive(Debug, Deserialize)]
pub struct GetUserReviewParams {
    #[serde(default)]
    pub user_id: String,
}

pub async fn get_user_reviews(
    State(state): State<AppState>,
    Query(params): Query<GetUserReviewParams>,
) -> ApiResult<Response> {
    if params.user_id.is_empty() {
        return Err(ApiError::invalid("user_id parameter is required"));
    }

    let prs = state
        .user_service
        .get_user_review_requests(&params.user_id)
        .await?;

    let response = UserReviewResponse {
        user_id: params.user_id,
        pull_requests: prs.into_iter().map(Into::into).collect(),
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}
