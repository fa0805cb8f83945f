//! In-memory store implementation.
//!
//! Keeps all entities in `RwLock`-guarded maps with the same observable
//! semantics as the Postgres adapter. Primary use-case: deterministic
//! service and router tests that need no database.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AssignmentStats, PullRequestStore, TeamStore, UserStore};
use crate::models::{PullRequest, Team, User, UserAssignmentCount};
use crate::{Error, Result};

#[derive(Default)]
pub struct InMemoryStore {
    team_names: RwLock<Vec<String>>,
    users: RwLock<HashMap<String, User>>,
    pull_requests: RwLock<HashMap<String, PullRequest>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Members sorted by id so iteration order is deterministic.
    async fn members_of(&self, team_name: &str) -> Vec<User> {
        let users = self.users.read().await;
        let mut members: Vec<User> = users
            .values()
            .filter(|u| u.team_name == team_name)
            .cloned()
            .collect();
        members.sort_by(|a, b| a.id.cmp(&b.id));
        members
    }
}

#[async_trait]
impl TeamStore for InMemoryStore {
    async fn create_team(&self, team: &Team) -> Result<()> {
        let mut names = self.team_names.write().await;
        if names.iter().any(|n| n == &team.name) {
            return Err(Error::TeamExists(team.name.clone()));
        }
        names.push(team.name.clone());
        Ok(())
    }

    async fn get_team_by_name(&self, team_name: &str) -> Result<Team> {
        {
            let names = self.team_names.read().await;
            if !names.iter().any(|n| n == team_name) {
                return Err(Error::TeamNotFound(team_name.to_string()));
            }
        }
        Ok(Team {
            name: team_name.to_string(),
            members: self.members_of(team_name).await,
        })
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn upsert_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn get_user_by_id(&self, user_id: &str) -> Result<User> {
        let users = self.users.read().await;
        users
            .get(user_id)
            .cloned()
            .ok_or_else(|| Error::UserNotFound(user_id.to_string()))
    }

    async fn get_users_by_team(&self, team_name: &str) -> Result<Vec<User>> {
        Ok(self.members_of(team_name).await)
    }
}

#[async_trait]
impl PullRequestStore for InMemoryStore {
    async fn create_pr(&self, pr: &PullRequest) -> Result<()> {
        let mut prs = self.pull_requests.write().await;
        if prs.contains_key(&pr.id) {
            return Err(Error::PullRequestExists(pr.id.clone()));
        }
        prs.insert(pr.id.clone(), pr.clone());
        Ok(())
    }

    async fn get_pr_by_id(&self, pr_id: &str) -> Result<PullRequest> {
        let prs = self.pull_requests.read().await;
        prs.get(pr_id)
            .cloned()
            .ok_or_else(|| Error::PullRequestNotFound(pr_id.to_string()))
    }

    async fn get_prs_by_reviewer(&self, user_id: &str) -> Result<Vec<PullRequest>> {
        {
            let users = self.users.read().await;
            if !users.contains_key(user_id) {
                return Err(Error::UserNotFound(user_id.to_string()));
            }
        }

        let prs = self.pull_requests.read().await;
        let mut assigned: Vec<PullRequest> = prs
            .values()
            .filter(|pr| pr.assigned_reviewers.iter().any(|r| r == user_id))
            .cloned()
            .collect();
        assigned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(assigned)
    }

    async fn update_pr(&self, pr: &PullRequest) -> Result<()> {
        let mut prs = self.pull_requests.write().await;
        let stored = prs
            .get_mut(&pr.id)
            .ok_or_else(|| Error::PullRequestNotFound(pr.id.clone()))?;

        // Reviewer associations are frozen once merged.
        let reviewers = if pr.is_merged() {
            stored.assigned_reviewers.clone()
        } else {
            pr.assigned_reviewers.clone()
        };

        *stored = PullRequest {
            assigned_reviewers: reviewers,
            ..pr.clone()
        };
        Ok(())
    }
}

#[async_trait]
impl AssignmentStats for InMemoryStore {
    async fn user_assignment_stats(&self) -> Result<Vec<UserAssignmentCount>> {
        let users = self.users.read().await;
        let prs = self.pull_requests.read().await;

        let mut stats: Vec<UserAssignmentCount> = users
            .values()
            .filter(|u| u.is_active)
            .map(|u| {
                let count = prs
                    .values()
                    .filter(|pr| pr.assigned_reviewers.iter().any(|r| r == &u.id))
                    .count() as i64;
                UserAssignmentCount {
                    user_id: u.id.clone(),
                    assignment_count: count,
                }
            })
            .collect();

        stats.sort_by(|a, b| {
            b.assignment_count
                .cmp(&a.assignment_count)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        Ok(stats)
    }
}
