//! Reporting endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use review_core::models::UserAssignmentCount;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UserAssignmentStatsResponse {
    /// Per-active-user assignment counts, highest first.
    pub user_assignments: Vec<UserAssignmentCount>,
}

pub async fn user_assignment_stats(State(state): State<AppState>) -> ApiResult<Response> {
    let user_assignments = state.stats.user_assignment_stats().await?;

    Ok((
        StatusCode::OK,
        Json(UserAssignmentStatsResponse { user_assignments }),
    )
        .into_response())
}
