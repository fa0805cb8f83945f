//! PullRequestService lifecycle and reviewer-assignment behavior.

mod support;

use review_core::models::PullRequestStatus;
use review_core::store::{AssignmentStats, PullRequestStore, UserStore};
use review_core::Error;
use support::{fixture, team, user, Fixture};

/// Team with an active author and two active reviewers.
async fn seeded() -> Fixture {
    let f = fixture();
    f.teams
        .create_team(team(
            "t1",
            vec![
                user("a1", "t1", true),
                user("r1", "t1", true),
                user("r2", "t1", true),
            ],
        ))
        .await
        .unwrap();
    f
}

#[tokio::test]
async fn create_assigns_up_to_two_reviewers_from_the_authors_team() {
    let f = seeded().await;

    let pr = f.pull_requests.create_pr("p1", "feature", "a1").await.unwrap();

    assert_eq!(pr.status, PullRequestStatus::Open);
    assert!(pr.merged_at.is_none());
    assert!(pr.assigned_reviewers.len() <= 2);
    assert!(!pr.assigned_reviewers.contains(&"a1".to_string()));
    for reviewer in &pr.assigned_reviewers {
        assert!(reviewer == "r1" || reviewer == "r2");
    }
}

#[tokio::test]
async fn create_with_no_eligible_teammate_yields_empty_reviewer_list() {
    let f = fixture();
    f.teams
        .create_team(team(
            "solo",
            vec![user("a1", "solo", true), user("r1", "solo", false)],
        ))
        .await
        .unwrap();

    let pr = f.pull_requests.create_pr("p1", "lonely", "a1").await.unwrap();
    assert!(pr.assigned_reviewers.is_empty());
}

#[tokio::test]
async fn create_with_taken_id_fails_before_author_checks() {
    let f = seeded().await;
    f.pull_requests.create_pr("p1", "first", "a1").await.unwrap();

    let err = f
        .pull_requests
        .create_pr("p1", "second", "a1")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::PullRequestExists(id) if id == "p1"));

    // Existence wins even when the author would also be rejected.
    let err = f
        .pull_requests
        .create_pr("p1", "second", "ghost")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::PullRequestExists(_)));
}

#[tokio::test]
async fn create_rejects_missing_or_inactive_author() {
    let f = seeded().await;

    let err = f
        .pull_requests
        .create_pr("p1", "feature", "ghost")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UserNotFound(_)));

    f.users.set_user_active("a1", false).await.unwrap();
    let err = f
        .pull_requests
        .create_pr("p1", "feature", "a1")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UserNotActive(id) if id == "a1"));
}

#[tokio::test]
async fn merge_is_idempotent() {
    let f = seeded().await;
    f.pull_requests.create_pr("p1", "feature", "a1").await.unwrap();

    let first = f.pull_requests.merge_pr("p1").await.unwrap();
    assert_eq!(first.status, PullRequestStatus::Merged);
    let merged_at = first.merged_at.expect("merged_at set on merge");

    let second = f.pull_requests.merge_pr("p1").await.unwrap();
    assert_eq!(second.status, PullRequestStatus::Merged);
    assert_eq!(second.merged_at, Some(merged_at));
    assert_eq!(second.assigned_reviewers, first.assigned_reviewers);
}

#[tokio::test]
async fn merge_unknown_pr_fails_not_found() {
    let f = seeded().await;

    let err = f.pull_requests.merge_pr("ghost").await.unwrap_err();
    assert!(matches!(err, Error::PullRequestNotFound(_)));
}

#[tokio::test]
async fn reassign_on_merged_pr_fails_and_leaves_it_unchanged() {
    let f = seeded().await;
    f.pull_requests.create_pr("p1", "feature", "a1").await.unwrap();
    let merged = f.pull_requests.merge_pr("p1").await.unwrap();

    let err = f
        .pull_requests
        .reassign_reviewer("p1", &merged.assigned_reviewers[0])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::PullRequestMerged(_)));

    // Merged wins even when the reviewer is not assigned at all.
    let err = f
        .pull_requests
        .reassign_reviewer("p1", "ghost")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::PullRequestMerged(_)));

    let stored = f.store.get_pr_by_id("p1").await.unwrap();
    assert_eq!(stored, merged);
}

#[tokio::test]
async fn reassign_unassigned_reviewer_fails() {
    let f = seeded().await;
    f.pull_requests.create_pr("p1", "feature", "a1").await.unwrap();

    let err = f
        .pull_requests
        .reassign_reviewer("p1", "a1")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::ReviewerNotAssigned { pull_request_id, user_id }
            if pull_request_id == "p1" && user_id == "a1"
    ));
}

#[tokio::test]
async fn reassign_with_no_replacement_candidate_fails() {
    let f = seeded().await;
    // Both active teammates get assigned; excluding them and the author
    // leaves nobody.
    let pr = f.pull_requests.create_pr("p1", "feature", "a1").await.unwrap();
    assert_eq!(pr.assigned_reviewers.len(), 2);

    let err = f
        .pull_requests
        .reassign_reviewer("p1", "r1")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoCandidate(name) if name == "t1"));
}

#[tokio::test]
async fn reassign_picks_the_fresh_teammate_once_one_exists() {
    let f = seeded().await;
    let pr = f.pull_requests.create_pr("p1", "feature", "a1").await.unwrap();
    assert_eq!(pr.assigned_reviewers, vec!["r1", "r2"]);

    // r3 joins the team, becoming the only eligible replacement.
    f.store.upsert_user(&user("r3", "t1", true)).await.unwrap();

    let reassignment = f
        .pull_requests
        .reassign_reviewer("p1", "r1")
        .await
        .unwrap();
    assert_eq!(reassignment.new_reviewer_id, "r3");
    // First occurrence replaced in place, order otherwise preserved.
    assert_eq!(
        reassignment.pull_request.assigned_reviewers,
        vec!["r3", "r2"]
    );

    let stored = f.store.get_pr_by_id("p1").await.unwrap();
    assert_eq!(stored.assigned_reviewers, vec!["r3", "r2"]);
}

#[tokio::test]
async fn reassign_ignores_inactive_teammates() {
    let f = seeded().await;
    f.pull_requests.create_pr("p1", "feature", "a1").await.unwrap();

    f.store.upsert_user(&user("r3", "t1", false)).await.unwrap();

    let err = f
        .pull_requests
        .reassign_reviewer("p1", "r1")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoCandidate(_)));
}

#[tokio::test]
async fn assignment_stats_count_active_users_sorted_descending() {
    let f = seeded().await;
    f.pull_requests.create_pr("p1", "one", "a1").await.unwrap();
    f.pull_requests.create_pr("p2", "two", "a1").await.unwrap();
    f.users.set_user_active("r2", false).await.unwrap();

    let stats = f.store.user_assignment_stats().await.unwrap();
    let pairs: Vec<(&str, i64)> = stats
        .iter()
        .map(|s| (s.user_id.as_str(), s.assignment_count))
        .collect();

    // r2 is inactive and filtered out; counts are descending.
    assert_eq!(pairs, vec![("r1", 2), ("a1", 0)]);
}
