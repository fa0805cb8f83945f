//! Error kinds produced by the domain layer.
//!
//! Every business-rule failure has its own variant so callers can match on
//! the kind at any layer. Storage failures are wrapped opaquely: the domain
//! crate never inspects them beyond logging.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("team '{0}' already exists")]
    TeamExists(String),

    #[error("team '{0}' not found")]
    TeamNotFound(String),

    #[error("user '{0}' not found")]
    UserNotFound(String),

    #[error("user '{0}' is not active")]
    UserNotActive(String),

    #[error("pull request '{0}' already exists")]
    PullRequestExists(String),

    #[error("pull request '{0}' not found")]
    PullRequestNotFound(String),

    #[error("cannot modify merged pull request '{0}'")]
    PullRequestMerged(String),

    #[error("user '{user_id}' is not an assigned reviewer of pull request '{pull_request_id}'")]
    ReviewerNotAssigned {
        pull_request_id: String,
        user_id: String,
    },

    #[error("no active replacement candidate in team '{0}'")]
    NoCandidate(String),

    /// Failure originating from the persistence boundary, not from a
    /// business rule. Never differentiated to API callers.
    #[error("storage failure during {context}")]
    Storage {
        context: String,
        #[source]
        source: BoxError,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Wrap an adapter-level failure with the operation it occurred in.
    pub fn storage(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Storage {
            context: context.into(),
            source: source.into(),
        }
    }

    /// True for the kinds that map to a plain "resource not found" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TeamNotFound(_) | Self::UserNotFound(_) | Self::PullRequestNotFound(_)
        )
    }
}
