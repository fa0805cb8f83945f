//! User activation and review-duty lookups.

use std::sync::Arc;

use crate::models::{PullRequest, User};
use crate::store::{PullRequestStore, UserStore};
use crate::Result;

pub struct UserService {
    users: Arc<dyn UserStore>,
    pull_requests: Arc<dyn PullRequestStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, pull_requests: Arc<dyn PullRequestStore>) -> Self {
        Self {
            users,
            pull_requests,
        }
    }

    /// Set the active flag and return the updated user. Writing a value
    /// that already matches is a no-op write that still succeeds.
    pub async fn set_user_active(&self, user_id: &str, is_active: bool) -> Result<User> {
        let mut user = self.users.get_user_by_id(user_id).await?;
        user.is_active = is_active;
        self.users.upsert_user(&user).await?;
        Ok(user)
    }

    /// Pull requests (any status) where the user is currently an assigned
    /// reviewer, newest-created first.
    pub async fn get_user_review_requests(&self, user_id: &str) -> Result<Vec<PullRequest>> {
        self.users.get_user_by_id(user_id).await?;
        self.pull_requests.get_prs_by_reviewer(user_id).await
    }
}
