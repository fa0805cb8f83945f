#![allow(dead_code)]
//! Shared fixtures for service tests: all services wired over one
//! `InMemoryStore` with a deterministic picker.

use std::sync::Arc;

use review_core::models::{Team, User};
use review_core::picker::{ReviewerPicker, SequentialPicker};
use review_core::services::{PullRequestService, TeamService, UserService};
use review_core::store::InMemoryStore;

pub struct Fixture {
    pub store: Arc<InMemoryStore>,
    pub teams: TeamService,
    pub users: UserService,
    pub pull_requests: PullRequestService,
}

pub fn fixture() -> Fixture {
    fixture_with_picker(Arc::new(SequentialPicker))
}

pub fn fixture_with_picker(picker: Arc<dyn ReviewerPicker>) -> Fixture {
    let store = Arc::new(InMemoryStore::new());
    Fixture {
        teams: TeamService::new(store.clone(), store.clone()),
        users: UserService::new(store.clone(), store.clone()),
        pull_requests: PullRequestService::new(store.clone(), store.clone(), picker),
        store,
    }
}

pub fn user(id: &str, team_name: &str, is_active: bool) -> User {
    User {
        id: id.to_string(),
        username: format!("user-{id}"),
        team_name: team_name.to_string(),
        is_active,
    }
}

pub fn team(name: &str, members: Vec<User>) -> Team {
    Team {
        name: name.to_string(),
        members,
    }
}
