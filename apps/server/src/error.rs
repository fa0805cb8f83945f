//! HTTP mapping for domain errors.
//!
//! Business-rule failures map to 4xx responses with a stable machine-readable
//! code; storage failures are logged with full context and surfaced only as a
//! generic 500.

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use review_core::Error;
use serde::Serialize;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// `Json` extractor whose rejection speaks the error envelope. Malformed
/// bodies answer 400 with `INVALID_REQUEST` instead of axum's plain-text
/// 422.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::invalid(rejection.body_text())),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    /// A domain error kind from the service layer.
    Domain(Error),
    /// Request-shape problem caught before any service call.
    InvalidRequest(String),
}

impl ApiError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::Domain(err)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::InvalidRequest(message) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST", message),
            Self::Domain(err) => match &err {
                Error::TeamExists(_) => (
                    StatusCode::BAD_REQUEST,
                    "TEAM_EXISTS",
                    "team_name already exists".to_string(),
                ),
                // Inactive users are deliberately indistinguishable from
                // missing ones on the wire.
                Error::UserNotActive(_) => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    "resource not found".to_string(),
                ),
                e if e.is_not_found() => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    "resource not found".to_string(),
                ),
                Error::PullRequestExists(_) => (
                    StatusCode::CONFLICT,
                    "PR_EXISTS",
                    "pull request id already exists".to_string(),
                ),
                Error::PullRequestMerged(_) => (
                    StatusCode::CONFLICT,
                    "PR_MERGED",
                    "cannot reassign on merged pull request".to_string(),
                ),
                Error::ReviewerNotAssigned { .. } => (
                    StatusCode::CONFLICT,
                    "NOT_ASSIGNED",
                    "reviewer is not assigned to this pull request".to_string(),
                ),
                Error::NoCandidate(_) => (
                    StatusCode::CONFLICT,
                    "NO_CANDIDATE",
                    "no active replacement candidate in team".to_string(),
                ),
                Error::Storage { .. } | Error::Internal(_) => {
                    tracing::error!(error = %err, source = ?std::error::Error::source(&err), "request failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL",
                        "internal server error".to_string(),
                    )
                }
                // Remaining kinds are unreachable from current handlers.
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "internal server error".to_string(),
                ),
            },
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}
