//! Store abstractions consumed by the services.
//!
//! Each trait is a capability set over one entity, not a database binding.
//! Implementations must provide read-then-write atomicity per call; the
//! services perform no locking or retries of their own.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;

use crate::models::{PullRequest, Team, User, UserAssignmentCount};
use crate::Result;

#[async_trait]
pub trait TeamStore: Send + Sync {
    async fn create_team(&self, team: &Team) -> Result<()>;

    /// Returns the team plus its current member roster, read fresh from the
    /// user rows by team name. Fails with `TeamNotFound` if absent.
    async fn get_team_by_name(&self, team_name: &str) -> Result<Team>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert or fully replace the user row.
    async fn upsert_user(&self, user: &User) -> Result<()>;

    /// Fails with `UserNotFound` if absent.
    async fn get_user_by_id(&self, user_id: &str) -> Result<User>;

    /// All users whose `team_name` matches. An unknown team yields an empty
    /// list, not an error.
    async fn get_users_by_team(&self, team_name: &str) -> Result<Vec<User>>;
}

#[async_trait]
pub trait PullRequestStore: Send + Sync {
    /// Persists the pull request row together with its reviewer
    /// associations as one atomic unit.
    async fn create_pr(&self, pr: &PullRequest) -> Result<()>;

    /// Fails with `PullRequestNotFound` if absent. Includes the ordered
    /// reviewer list.
    async fn get_pr_by_id(&self, pr_id: &str) -> Result<PullRequest>;

    /// Pull requests (any status) where the user is currently an assigned
    /// reviewer, newest-created first with ties broken by id descending.
    /// The store verifies the user exists and fails with `UserNotFound`
    /// otherwise.
    async fn get_prs_by_reviewer(&self, user_id: &str) -> Result<Vec<PullRequest>>;

    /// Rewrites the pull request row. The reviewer set is replaced wholesale
    /// unless the pull request is merged, in which case the stored reviewer
    /// associations are left untouched. Fails with `PullRequestNotFound` if
    /// no row matches.
    async fn update_pr(&self, pr: &PullRequest) -> Result<()>;
}

/// Read-only reporting aggregate; involves no business logic.
#[async_trait]
pub trait AssignmentStats: Send + Sync {
    /// Count of review assignments per active user, sorted descending.
    async fn user_assignment_stats(&self) -> Result<Vec<UserAssignmentCount>>;
}
