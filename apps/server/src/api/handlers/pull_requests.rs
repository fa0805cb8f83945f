//! Pull request endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use review_core::models::{PullRequest, PullRequestStatus};

use crate::error::{ApiError, ApiJson, ApiResult};
use crate::state::AppState;

// Missing request fields decode to empty strings and fall through to the
// explicit checks below, so the caller sees which field is absent.
#[derive(Debug, Deserialize)]
pub struct CreatePrRequest {
    #[serde(default)]
    pub pull_request_id: String,
    #[serde(default)]
    pub pull_request_name: String,
    #[serde(default)]
    pub author_id: String,
}

#[derive(Debug, Serialize)]
pub struct PullRequestDto {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
    pub assigned_reviewers: Vec<String>,
}

impl From<PullRequest> for PullRequestDto {
    fn from(pr: PullRequest) -> Self {
        Self {
            pull_request_id: pr.id,
            pull_request_name: pr.name,
            author_id: pr.author_id,
            status: pr.status,
            assigned_reviewers: pr.assigned_reviewers,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatePrResponse {
    pub pr: PullRequestDto,
}

pub async fn create_pr(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreatePrRequest>,
) -> ApiResult<Response> {
    if req.pull_request_id.is_empty() {
        return Err(ApiError::invalid("pull_request_id is required"));
    }
    if req.pull_request_name.is_empty() {
        return Err(ApiError::invalid("pull_request_name is required"));
    }
    if req.author_id.is_empty() {
        return Err(ApiError::invalid("author_id is required"));
    }

    let pr = state
        .pull_request_service
        .create_pr(&req.pull_request_id, &req.pull_request_name, &req.author_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePrResponse { pr: pr.into() }),
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct MergePrRequest {
    #[serde(default)]
    pub pull_request_id: String,
}

/// Merge responses additionally carry the merge timestamp.
#[derive(Debug, Serialize)]
pub struct PullRequestMergedDto {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
    pub assigned_reviewers: Vec<String>,
    #[serde(rename = "mergedAt")]
    pub merged_at: String,
}

impl From<PullRequest> for PullRequestMergedDto {
    fn from(pr: PullRequest) -> Self {
        Self {
            pull_request_id: pr.id,
            pull_request_name: pr.name,
            author_id: pr.author_id,
            status: pr.status,
            assigned_reviewers: pr.assigned_reviewers,
            merged_at: pr
                .merged_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MergePrResponse {
    pub pr: PullRequestMergedDto,
}

pub async fn merge_pr(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<MergePrRequest>,
) -> ApiResult<Response> {
    if req.pull_request_id.is_empty() {
        return Err(ApiError::invalid("pull_request_id is required"));
    }

    let pr = state
        .pull_request_service
        .merge_pr(&req.pull_request_id)
        .await?;

    Ok((StatusCode::OK, Json(MergePrResponse { pr: pr.into() })).into_response())
}

#[derive(Debug, Deserialize)]
pub struct ReassignReviewerRequest {
    #[serde(default)]
    pub pull_request_id: String,
    #[serde(default)]
    pub old_reviewer_id: String,
}

#[derive(Debug, Serialize)]
pub struct ReassignReviewerResponse {
    pub pr: PullRequestDto,
    pub replaced_by: String,
}

pub async fn reassign_reviewer(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ReassignReviewerRequest>,
) -> ApiResult<Response> {
    if req.pull_request_id.is_empty() {
        return Err(ApiError::invalid("pull_request_id is required"));
    }
    if req.old_reviewer_id.is_empty() {
        return Err(ApiError::invalid("old_reviewer_id is required"));
    }

    let reassignment = state
        .pull_request_service
        .reassign_reviewer(&req.pull_request_id, &req.old_reviewer_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ReassignReviewerResponse {
            pr: reassignment.pull_request.into(),
            replaced_by: reassignment.new_reviewer_id,
        }),
    )
        .into_response())
}
