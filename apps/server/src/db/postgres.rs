//! PostgreSQL implementation of the store traits.
//!
//! Multi-row writes (pull request plus its reviewer associations) run inside
//! one transaction so each logical service call observes read-then-write
//! atomicity. Reviewer associations carry an explicit `position` column:
//! the reviewer list is ordered and reassignment replaces in place.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use review_core::models::{PullRequest, PullRequestStatus, Team, User, UserAssignmentCount};
use review_core::store::{AssignmentStats, PullRequestStore, TeamStore, UserStore};
use review_core::{Error, Result};

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn user_from_row(row: &sqlx::postgres::PgRow) -> User {
        User {
            id: row.get("id"),
            username: row.get("username"),
            team_name: row.get("team_name"),
            is_active: row.get("is_active"),
        }
    }

    fn pr_from_row(row: &sqlx::postgres::PgRow) -> Result<PullRequest> {
        let status: String = row.get("status");
        let status: PullRequestStatus = status.parse().map_err(Error::Internal)?;

        Ok(PullRequest {
            id: row.get("id"),
            name: row.get("name"),
            author_id: row.get("author_id"),
            status,
            created_at: row.get::<DateTime<Utc>, _>("created_at"),
            merged_at: row.get::<Option<DateTime<Utc>>, _>("merged_at"),
            assigned_reviewers: Vec::new(),
        })
    }

    async fn reviewers_of(&self, pr_id: &str) -> Result<Vec<String>> {
        let rows = sqlx::query(
            "SELECT user_id FROM pull_request_reviewers
             WHERE pull_request_id = $1
             ORDER BY position",
        )
        .bind(pr_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::storage("load reviewers", e))?;

        Ok(rows.into_iter().map(|r| r.get("user_id")).collect())
    }
}

#[async_trait]
impl TeamStore for PostgresStore {
    async fn create_team(&self, team: &Team) -> Result<()> {
        sqlx::query("INSERT INTO teams (name) VALUES ($1)")
            .bind(&team.name)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::storage(format!("create team '{}'", team.name), e))?;
        Ok(())
    }

    async fn get_team_by_name(&self, team_name: &str) -> Result<Team> {
        let row = sqlx::query("SELECT name FROM teams WHERE name = $1")
            .bind(team_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::storage(format!("get team '{team_name}'"), e))?;

        if row.is_none() {
            return Err(Error::TeamNotFound(team_name.to_string()));
        }

        let members = self.get_users_by_team(team_name).await?;
        Ok(Team {
            name: team_name.to_string(),
            members,
        })
    }
}

#[async_trait]
impl UserStore for PostgresStore {
    async fn upsert_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            "INSERT INTO users (id, username, team_name, is_active)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO UPDATE SET
                 username = EXCLUDED.username,
                 team_name = EXCLUDED.team_name,
                 is_active = EXCLUDED.is_active",
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.team_name)
        .bind(user.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::storage(format!("upsert user '{}'", user.id), e))?;
        Ok(())
    }

    async fn get_user_by_id(&self, user_id: &str) -> Result<User> {
        let row = sqlx::query(
            "SELECT id, username, team_name, is_active FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::storage(format!("get user '{user_id}'"), e))?;

        row.map(|r| Self::user_from_row(&r))
            .ok_or_else(|| Error::UserNotFound(user_id.to_string()))
    }

    async fn get_users_by_team(&self, team_name: &str) -> Result<Vec<User>> {
        let rows = sqlx::query(
            "SELECT id, username, team_name, is_active
             FROM users
             WHERE team_name = $1
             ORDER BY id",
        )
        .bind(team_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::storage(format!("get users of team '{team_name}'"), e))?;

        Ok(rows.iter().map(Self::user_from_row).collect())
    }
}

#[async_trait]
impl PullRequestStore for PostgresStore {
    async fn create_pr(&self, pr: &PullRequest) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::storage("begin create transaction", e))?;

        sqlx::query(
            "INSERT INTO pull_requests (id, name, author_id, status, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&pr.id)
        .bind(&pr.name)
        .bind(&pr.author_id)
        .bind(pr.status.as_str())
        .bind(pr.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::storage(format!("insert pull request '{}'", pr.id), e))?;

        for (position, reviewer_id) in pr.assigned_reviewers.iter().enumerate() {
            sqlx::query(
                "INSERT INTO pull_request_reviewers (pull_request_id, user_id, position)
                 VALUES ($1, $2, $3)",
            )
            .bind(&pr.id)
            .bind(reviewer_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                Error::storage(
                    format!("assign reviewer '{reviewer_id}' to pull request '{}'", pr.id),
                    e,
                )
            })?;
        }

        tx.commit()
            .await
            .map_err(|e| Error::storage("commit pull request creation", e))?;
        Ok(())
    }

    async fn get_pr_by_id(&self, pr_id: &str) -> Result<PullRequest> {
        let row = sqlx::query(
            "SELECT id, name, author_id, status, created_at, merged_at
             FROM pull_requests
             WHERE id = $1",
        )
        .bind(pr_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::storage(format!("get pull request '{pr_id}'"), e))?;

        let Some(row) = row else {
            return Err(Error::PullRequestNotFound(pr_id.to_string()));
        };

        let mut pr = Self::pr_from_row(&row)?;
        pr.assigned_reviewers = self.reviewers_of(pr_id).await?;
        Ok(pr)
    }

    async fn get_prs_by_reviewer(&self, user_id: &str) -> Result<Vec<PullRequest>> {
        // The user itself must exist; an unknown id is a not-found, not an
        // empty list.
        let exists = sqlx::query("SELECT 1 FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::storage(format!("check user '{user_id}' exists"), e))?;
        if exists.is_none() {
            return Err(Error::UserNotFound(user_id.to_string()));
        }

        let rows = sqlx::query(
            "SELECT pr.id, pr.name, pr.author_id, pr.status, pr.created_at, pr.merged_at
             FROM pull_requests pr
             JOIN pull_request_reviewers prr ON pr.id = prr.pull_request_id
             WHERE prr.user_id = $1
             ORDER BY pr.created_at DESC, pr.id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::storage(format!("get pull requests for reviewer '{user_id}'"), e))?;

        let mut prs = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut pr = Self::pr_from_row(row)?;
            pr.assigned_reviewers = self.reviewers_of(&pr.id).await?;
            prs.push(pr);
        }
        Ok(prs)
    }

    async fn update_pr(&self, pr: &PullRequest) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::storage("begin update transaction", e))?;

        let result = sqlx::query(
            "UPDATE pull_requests
             SET name = $1, author_id = $2, status = $3, merged_at = $4
             WHERE id = $5",
        )
        .bind(&pr.name)
        .bind(&pr.author_id)
        .bind(pr.status.as_str())
        .bind(pr.merged_at)
        .bind(&pr.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::storage(format!("update pull request '{}'", pr.id), e))?;

        if result.rows_affected() == 0 {
            return Err(Error::PullRequestNotFound(pr.id.clone()));
        }

        // Reviewer associations are frozen once merged.
        if pr.is_merged() {
            tx.commit()
                .await
                .map_err(|e| Error::storage("commit pull request update", e))?;
            return Ok(());
        }

        sqlx::query("DELETE FROM pull_request_reviewers WHERE pull_request_id = $1")
            .bind(&pr.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                Error::storage(format!("clear reviewers of pull request '{}'", pr.id), e)
            })?;

        for (position, reviewer_id) in pr.assigned_reviewers.iter().enumerate() {
            sqlx::query(
                "INSERT INTO pull_request_reviewers (pull_request_id, user_id, position)
                 VALUES ($1, $2, $3)",
            )
            .bind(&pr.id)
            .bind(reviewer_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                Error::storage(
                    format!("assign reviewer '{reviewer_id}' to pull request '{}'", pr.id),
                    e,
                )
            })?;
        }

        tx.commit()
            .await
            .map_err(|e| Error::storage("commit pull request update", e))?;
        Ok(())
    }
}

#[async_trait]
impl AssignmentStats for PostgresStore {
    async fn user_assignment_stats(&self) -> Result<Vec<UserAssignmentCount>> {
        let rows = sqlx::query(
            "SELECT u.id AS user_id,
                    COUNT(prr.user_id) AS assignment_count
             FROM users u
             LEFT JOIN pull_request_reviewers prr ON u.id = prr.user_id
             WHERE u.is_active = TRUE
             GROUP BY u.id
             ORDER BY assignment_count DESC, u.id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::storage("get user assignment stats", e))?;

        Ok(rows
            .into_iter()
            .map(|row| UserAssignmentCount {
                user_id: row.get("user_id"),
                assignment_count: row.get("assignment_count"),
            })
            .collect())
    }
}
