//! Domain entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user. `team_name` on the user row is the source of truth for
/// team membership; a user belongs to exactly one team at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

/// A team. `name` is the primary key; the member list is a snapshot read
/// from the user store at lookup time, not a maintained relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub members: Vec<User>,
}

/// Lifecycle of a pull request: `Open` is the only initial state and
/// `Merged` the only terminal one. There is no transition back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PullRequestStatus {
    #[serde(rename = "OPEN")]
    Open,
    #[serde(rename = "MERGED")]
    Merged,
}

impl PullRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
        }
    }
}

impl std::str::FromStr for PullRequestStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "MERGED" => Ok(Self::Merged),
            other => Err(format!("unknown pull request status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: String,
    pub name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
    /// Ordered list of reviewer user IDs, at most two entries at creation.
    /// Frozen once the pull request is merged.
    pub assigned_reviewers: Vec<String>,
}

impl PullRequest {
    pub fn is_merged(&self) -> bool {
        self.status == PullRequestStatus::Merged
    }
}

/// Result of a reviewer reassignment: the updated pull request paired with
/// the reviewer that replaced the old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewReassignment {
    pub pull_request: PullRequest,
    pub new_reviewer_id: String,
}

/// Number of review assignments currently held by one active user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAssignmentCount {
    pub user_id: String,
    pub assignment_count: i64,
}
