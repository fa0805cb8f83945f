//! Pull-request lifecycle and reviewer assignment.
//!
//! The state machine is `Open -> Merged` with no other transitions.
//! Reviewer selection is uniform over the eligible candidate set, drawn
//! through the injected [`ReviewerPicker`].

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use crate::models::{PullRequest, PullRequestStatus, ReviewReassignment, User};
use crate::picker::ReviewerPicker;
use crate::store::{PullRequestStore, UserStore};
use crate::{Error, Result};

/// Upper bound on reviewers assigned at creation.
pub const MAX_ASSIGNED_REVIEWERS: usize = 2;

pub struct PullRequestService {
    pull_requests: Arc<dyn PullRequestStore>,
    users: Arc<dyn UserStore>,
    picker: Arc<dyn ReviewerPicker>,
}

impl PullRequestService {
    pub fn new(
        pull_requests: Arc<dyn PullRequestStore>,
        users: Arc<dyn UserStore>,
        picker: Arc<dyn ReviewerPicker>,
    ) -> Self {
        Self {
            pull_requests,
            users,
            picker,
        }
    }

    /// Create an open pull request and assign up to two reviewers from the
    /// author's team.
    ///
    /// Check order is part of the contract: id uniqueness, then author
    /// existence, then author activity. An empty candidate set yields an
    /// empty reviewer list, not an error.
    pub async fn create_pr(&self, pr_id: &str, pr_name: &str, author_id: &str) -> Result<PullRequest> {
        match self.pull_requests.get_pr_by_id(pr_id).await {
            Ok(_) => return Err(Error::PullRequestExists(pr_id.to_string())),
            Err(Error::PullRequestNotFound(_)) => {}
            Err(e) => return Err(e),
        }

        let author = self.users.get_user_by_id(author_id).await?;
        if !author.is_active {
            return Err(Error::UserNotActive(author_id.to_string()));
        }

        let assigned_reviewers = self.assign_reviewers(&author).await?;

        let pr = PullRequest {
            id: pr_id.to_string(),
            name: pr_name.to_string(),
            author_id: author_id.to_string(),
            status: PullRequestStatus::Open,
            created_at: Utc::now(),
            merged_at: None,
            assigned_reviewers,
        };

        self.pull_requests.create_pr(&pr).await?;

        tracing::debug!(
            pr = %pr.id,
            author = %pr.author_id,
            reviewers = ?pr.assigned_reviewers,
            "pull request created"
        );
        Ok(pr)
    }

    async fn assign_reviewers(&self, author: &User) -> Result<Vec<String>> {
        let team_users = self.users.get_users_by_team(&author.team_name).await?;

        let candidates: Vec<String> = team_users
            .into_iter()
            .filter(|u| u.is_active && u.id != author.id)
            .map(|u| u.id)
            .collect();

        Ok(self.picker.pick(&candidates, MAX_ASSIGNED_REVIEWERS))
    }

    /// Transition a pull request to merged. Merging an already-merged pull
    /// request returns it unchanged; the reviewer list is never touched.
    pub async fn merge_pr(&self, pr_id: &str) -> Result<PullRequest> {
        let mut pr = self.pull_requests.get_pr_by_id(pr_id).await?;

        if pr.is_merged() {
            return Ok(pr);
        }

        pr.status = PullRequestStatus::Merged;
        pr.merged_at = Some(Utc::now());

        self.pull_requests.update_pr(&pr).await?;
        Ok(pr)
    }

    /// Replace one currently-assigned reviewer with a fresh uniform pick
    /// from the old reviewer's team.
    ///
    /// The exclusion set is the current reviewer list plus the author; the
    /// old reviewer is excluded only by virtue of already being assigned.
    pub async fn reassign_reviewer(
        &self,
        pr_id: &str,
        old_reviewer_id: &str,
    ) -> Result<ReviewReassignment> {
        let mut pr = self.pull_requests.get_pr_by_id(pr_id).await?;

        if pr.is_merged() {
            return Err(Error::PullRequestMerged(pr_id.to_string()));
        }

        if !pr.assigned_reviewers.iter().any(|r| r == old_reviewer_id) {
            return Err(Error::ReviewerNotAssigned {
                pull_request_id: pr_id.to_string(),
                user_id: old_reviewer_id.to_string(),
            });
        }

        let mut excluded: Vec<String> = pr.assigned_reviewers.clone();
        excluded.push(pr.author_id.clone());

        let new_reviewer_id = self.find_replacement(old_reviewer_id, &excluded).await?;

        // Replace the first occurrence, preserving list order otherwise.
        if let Some(slot) = pr
            .assigned_reviewers
            .iter_mut()
            .find(|r| r.as_str() == old_reviewer_id)
        {
            *slot = new_reviewer_id.clone();
        }

        self.pull_requests.update_pr(&pr).await?;

        tracing::debug!(
            pr = %pr.id,
            old_reviewer = old_reviewer_id,
            new_reviewer = %new_reviewer_id,
            "reviewer reassigned"
        );
        Ok(ReviewReassignment {
            pull_request: pr,
            new_reviewer_id,
        })
    }

    async fn find_replacement(&self, old_reviewer_id: &str, excluded: &[String]) -> Result<String> {
        let old_reviewer = self.users.get_user_by_id(old_reviewer_id).await?;
        let team_users = self.users.get_users_by_team(&old_reviewer.team_name).await?;

        let excluded: HashSet<&str> = excluded.iter().map(String::as_str).collect();
        let candidates: Vec<String> = team_users
            .into_iter()
            .filter(|u| u.is_active && !excluded.contains(u.id.as_str()))
            .map(|u| u.id)
            .collect();

        if candidates.is_empty() {
            return Err(Error::NoCandidate(old_reviewer.team_name));
        }

        self.picker
            .pick_one(&candidates)
            .ok_or_else(|| Error::Internal("picker returned nothing for a non-empty set".into()))
    }
}
