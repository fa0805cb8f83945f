//! Team creation and lookup.

use std::sync::Arc;

use crate::models::Team;
use crate::store::{TeamStore, UserStore};
use crate::{Error, Result};

pub struct TeamService {
    teams: Arc<dyn TeamStore>,
    users: Arc<dyn UserStore>,
}

impl TeamService {
    pub fn new(teams: Arc<dyn TeamStore>, users: Arc<dyn UserStore>) -> Self {
        Self { teams, users }
    }

    /// Create a team and upsert its initial member roster.
    ///
    /// Members are written with `team_name` pointing at the new team even if
    /// they previously belonged elsewhere; there is no ownership conflict
    /// check against prior membership.
    pub async fn create_team(&self, mut team: Team) -> Result<Team> {
        match self.teams.get_team_by_name(&team.name).await {
            Ok(_) => return Err(Error::TeamExists(team.name)),
            Err(Error::TeamNotFound(_)) => {}
            Err(e) => return Err(e),
        }

        self.teams.create_team(&team).await?;

        let team_name = team.name.clone();
        for member in &mut team.members {
            member.team_name = team_name.clone();
            self.users.upsert_user(member).await?;
        }

        tracing::debug!(team = %team.name, members = team.members.len(), "team created");
        Ok(team)
    }

    /// Look up a team and its current member roster.
    pub async fn get_team(&self, team_name: &str) -> Result<Team> {
        self.teams.get_team_by_name(team_name).await
    }
}
