//! UserService behavior over the in-memory store.

mod support;

use review_core::store::UserStore;
use review_core::Error;
use support::{fixture, team, user};

#[tokio::test]
async fn set_user_active_toggles_and_returns_the_user() {
    let f = fixture();
    f.store.upsert_user(&user("u1", "backend", true)).await.unwrap();

    let updated = f.users.set_user_active("u1", false).await.unwrap();
    assert!(!updated.is_active);

    // Idempotent: writing the same value again still succeeds.
    let again = f.users.set_user_active("u1", false).await.unwrap();
    assert!(!again.is_active);
}

#[tokio::test]
async fn set_user_active_fails_for_unknown_user() {
    let f = fixture();

    let err = f.users.set_user_active("ghost", true).await.unwrap_err();
    assert!(matches!(err, Error::UserNotFound(id) if id == "ghost"));
}

#[tokio::test]
async fn review_requests_include_any_status_newest_first() {
    let f = fixture();
    f.teams
        .create_team(team(
            "backend",
            vec![
                user("author", "backend", true),
                user("r1", "backend", true),
            ],
        ))
        .await
        .unwrap();

    // Both pull requests land on r1, the only candidate.
    f.pull_requests
        .create_pr("p1", "first", "author")
        .await
        .unwrap();
    f.pull_requests
        .create_pr("p2", "second", "author")
        .await
        .unwrap();
    f.pull_requests.merge_pr("p1").await.unwrap();

    let prs = f.users.get_user_review_requests("r1").await.unwrap();
    let ids: Vec<&str> = prs.iter().map(|pr| pr.id.as_str()).collect();
    assert_eq!(ids, vec!["p2", "p1"]);
    assert!(prs[1].is_merged());
}

#[tokio::test]
async fn review_requests_fail_for_unknown_user() {
    let f = fixture();

    let err = f.users.get_user_review_requests("ghost").await.unwrap_err();
    assert!(matches!(err, Error::UserNotFound(_)));
}
