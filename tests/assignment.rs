//! Drives the services directly against the relational storage.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use reviewer_service::{
    domain::{NewMember, NewPullRequest, NewTeam, PullRequest},
    service::{AssignmentEngine, Error, MembershipRegistry, PullRequestLifecycle, MAX_REVIEWERS},
    storage::{self, DbStorage, Storage, Transaction},
};
use sea_orm::DbConn;
use std::collections::HashSet;
use test_utils::setup_database;

async fn storage() -> DbStorage<DbConn> {
    DbStorage::new(setup_database().await)
}

async fn add_team(storage: &DbStorage<DbConn>, name: &str, members: &[(&str, bool)]) {
    let team = NewTeam {
        name: name.to_owned(),
        members: members
            .iter()
            .map(|(id, is_active)| NewMember {
                id: (*id).to_owned(),
                username: id.to_uppercase(),
                is_active: *is_active,
            })
            .collect(),
    };

    MembershipRegistry::new(storage.clone())
        .add_team(team)
        .await
        .unwrap();
}

async fn create(
    storage: &DbStorage<DbConn>,
    id: &str,
    author_id: &str,
    seed: u64,
) -> Result<PullRequest, Error> {
    let new = NewPullRequest {
        id: id.to_owned(),
        name: format!("Change {id}"),
        author_id: author_id.to_owned(),
    };

    PullRequestLifecycle::new(storage.clone())
        .create(new, &mut ChaCha20Rng::seed_from_u64(seed))
        .await
}

fn ids(pull_request: &PullRequest) -> Vec<String> {
    pull_request.reviewer_ids().map(str::to_owned).collect()
}

fn members(count: usize) -> Vec<(String, bool)> {
    (0..count).map(|i| (format!("u{i}"), true)).collect()
}

fn borrowed(members: &[(String, bool)]) -> Vec<(&str, bool)> {
    members
        .iter()
        .map(|(id, is_active)| (id.as_str(), *is_active))
        .collect()
}

#[tokio::test]
async fn reviewer_count_follows_team_size() {
    for size in 1..=5 {
        let storage = storage().await;
        let team = members(size);
        add_team(&storage, "backend", &borrowed(&team)).await;

        let result = create(&storage, "pr-1", "u0", size as u64).await;

        if size == 1 {
            assert!(matches!(result, Err(Error::NoAvailableReviewers(_))));
            continue;
        }

        let pull_request = result.unwrap();
        let reviewers = ids(&pull_request);
        let unique: HashSet<&String> = reviewers.iter().collect();

        assert_eq!(reviewers.len(), MAX_REVIEWERS.min(size - 1));
        assert_eq!(unique.len(), reviewers.len());
        assert!(!reviewers.contains(&"u0".to_owned()));
        assert!(reviewers
            .iter()
            .all(|id| team.iter().any(|(member, _)| member == id)));
    }
}

#[tokio::test]
async fn every_teammate_gets_picked_eventually() {
    let storage = storage().await;
    let team = members(5);
    add_team(&storage, "backend", &borrowed(&team)).await;

    let mut seen = HashSet::new();

    for seed in 0..40 {
        let pull_request = create(&storage, &format!("pr-{seed}"), "u0", seed)
            .await
            .unwrap();
        seen.extend(ids(&pull_request));
    }

    let expected: HashSet<String> = ["u1", "u2", "u3", "u4"].map(str::to_owned).into();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn failed_create_stores_nothing() {
    let storage = storage().await;
    add_team(&storage, "solo", &[("a", true)]).await;

    let result = create(&storage, "pr-1", "a", 0).await;

    assert!(matches!(result, Err(Error::NoAvailableReviewers(_))));
    assert!(!storage.pr_exists("pr-1").await.unwrap());
}

#[tokio::test]
async fn duplicate_create_keeps_original() {
    let storage = storage().await;
    add_team(&storage, "backend", &[("a", true), ("b", true), ("c", true)]).await;

    let first = create(&storage, "pr-1", "a", 0).await.unwrap();
    let second = create(&storage, "pr-1", "b", 1).await;

    assert!(matches!(second, Err(Error::PrAlreadyExists(_))));

    let stored = PullRequestLifecycle::new(storage.clone())
        .get("pr-1")
        .await
        .unwrap();

    assert_eq!(stored.author_id, "a");
    assert_eq!(ids(&stored), ids(&first));
}

#[tokio::test]
async fn reassignment_never_picks_excluded_users() {
    let storage = storage().await;
    let team = members(6);
    add_team(&storage, "backend", &borrowed(&team)).await;

    let engine = AssignmentEngine::new(storage.clone());
    let mut pull_request = create(&storage, "pr-1", "u0", 3).await.unwrap();

    for _ in 0..4 {
        let old = ids(&pull_request)[0].clone();
        let before: HashSet<String> = ids(&pull_request).into_iter().collect();

        let (updated, new) = engine.reassign_reviewer("pr-1", &old).await.unwrap();

        assert_ne!(new, "u0");
        assert!(!before.contains(&new));

        let after = ids(&updated);
        assert_eq!(after.len(), before.len());
        assert!(after.contains(&new));
        assert!(!after.contains(&old));

        pull_request = updated;
    }
}

#[tokio::test]
async fn merged_pull_request_is_frozen() {
    let storage = storage().await;
    add_team(
        &storage,
        "backend",
        &[("a", true), ("b", true), ("c", true), ("d", true)],
    )
    .await;

    let pull_request = create(&storage, "pr-1", "a", 0).await.unwrap();
    let lifecycle = PullRequestLifecycle::new(storage.clone());
    let engine = AssignmentEngine::new(storage.clone());

    let merged = lifecycle.merge("pr-1").await.unwrap();
    assert!(merged.is_merged());
    assert!(merged.merged_at.is_some());
    assert_eq!(ids(&merged), ids(&pull_request));

    let old = ids(&pull_request)[0].clone();
    assert!(matches!(
        engine.reassign_reviewer("pr-1", &old).await,
        Err(Error::PrAlreadyMerged(_))
    ));
    assert!(matches!(
        engine.reassign_reviewer("pr-1", "ghost").await,
        Err(Error::PrAlreadyMerged(_))
    ));
    assert!(matches!(
        lifecycle.merge("pr-1").await,
        Err(Error::PrAlreadyMerged(_))
    ));

    assert_eq!(ids(&lifecycle.get("pr-1").await.unwrap()), ids(&pull_request));
}

#[tokio::test]
async fn reassignment_checks_run_in_order() {
    let storage = storage().await;
    add_team(&storage, "backend", &[("a", true), ("b", true), ("c", true)]).await;
    create(&storage, "pr-1", "a", 0).await.unwrap();

    let engine = AssignmentEngine::new(storage.clone());

    assert!(matches!(
        engine.reassign_reviewer("nope", "ghost").await,
        Err(Error::PrNotFound(_))
    ));
    assert!(matches!(
        engine.reassign_reviewer("pr-1", "ghost").await,
        Err(Error::UserNotFound(_))
    ));
    assert!(matches!(
        engine.reassign_reviewer("pr-1", "a").await,
        Err(Error::ReviewerNotAssigned { .. })
    ));
    assert!(matches!(
        engine.reassign_reviewer("pr-1", "b").await,
        Err(Error::NoAvailableReviewers(_))
    ));
}

#[tokio::test]
async fn deactivation_keeps_assignments() {
    let storage = storage().await;
    add_team(&storage, "backend", &[("a", true), ("b", true)]).await;
    create(&storage, "pr-1", "a", 0).await.unwrap();

    let user = MembershipRegistry::new(storage.clone())
        .set_user_active("b", false)
        .await
        .unwrap();
    assert!(!user.is_active);

    let lifecycle = PullRequestLifecycle::new(storage.clone());

    assert_eq!(ids(&lifecycle.get("pr-1").await.unwrap()), ["b"]);

    let reviewing: Vec<String> = lifecycle
        .list_reviewing("b")
        .await
        .unwrap()
        .into_iter()
        .map(|pull_request| pull_request.id)
        .collect();
    assert_eq!(reviewing, ["pr-1"]);
}

#[tokio::test]
async fn concurrent_reassignments_replace_once() {
    let storage = storage().await;
    add_team(
        &storage,
        "backend",
        &[("a", true), ("b", true), ("c", true), ("d", true)],
    )
    .await;

    let pull_request = create(&storage, "pr-1", "a", 0).await.unwrap();
    let reviewers = ids(&pull_request);
    let old = reviewers[0].clone();
    let kept = reviewers[1].clone();

    let first = AssignmentEngine::new(storage.clone());
    let second = AssignmentEngine::new(storage.clone());

    let (left, right) = tokio::join!(
        first.reassign_reviewer("pr-1", &old),
        second.reassign_reviewer("pr-1", &old),
    );

    let results = [left, right];
    let successes = results.iter().filter(|result| result.is_ok()).count();
    assert_eq!(successes, 1);

    for result in &results {
        if let Err(error) = result {
            assert!(
                matches!(
                    error,
                    Error::ReviewerNotAssigned { .. }
                        | Error::NoAvailableReviewers(_)
                        | Error::Internal(_)
                ),
                "unexpected error: {error}"
            );
        }
    }

    let current = ids(&PullRequestLifecycle::new(storage.clone())
        .get("pr-1")
        .await
        .unwrap());

    assert_eq!(current.len(), 2);
    assert!(current.contains(&kept));
    assert!(!current.contains(&old));
}

mod gateway {
    use super::*;

    #[tokio::test]
    async fn reassign_of_unassigned_reviewer_conflicts() {
        let storage = storage().await;
        add_team(
            &storage,
            "backend",
            &[("a", true), ("b", true), ("c", true), ("d", true)],
        )
        .await;
        let pull_request = create(&storage, "pr-1", "a", 0).await.unwrap();
        let reviewers = ids(&pull_request);

        let result = storage.reassign_reviewer("pr-1", "d", "a").await;
        assert!(matches!(result, Err(storage::Error::Conflict(_))));

        let result = storage
            .reassign_reviewer("pr-1", &reviewers[1], &reviewers[0])
            .await;
        assert!(matches!(result, Err(storage::Error::Conflict(_))));

        let current: Vec<String> = storage
            .get_reviewers("pr-1")
            .await
            .unwrap()
            .into_iter()
            .map(|user| user.id)
            .collect();
        assert_eq!(current, reviewers);
    }

    #[tokio::test]
    async fn merge_is_one_way() {
        let storage = storage().await;
        add_team(&storage, "backend", &[("a", true), ("b", true)]).await;
        create(&storage, "pr-1", "a", 0).await.unwrap();

        storage.merge_pr("pr-1").await.unwrap();

        assert!(matches!(
            storage.merge_pr("pr-1").await,
            Err(storage::Error::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn dropped_transaction_rolls_back() {
        let storage = storage().await;

        {
            let txn = storage.begin().await.unwrap();
            txn.add_team("rolled-back").await.unwrap();
        }

        assert!(!storage.team_exists("rolled-back").await.unwrap());

        let txn = storage.begin().await.unwrap();
        txn.add_team("committed").await.unwrap();
        txn.commit().await.unwrap();

        assert!(storage.team_exists("committed").await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_team_conflicts() {
        let storage = storage().await;
        storage.add_team("backend").await.unwrap();

        assert!(matches!(
            storage.add_team("backend").await,
            Err(storage::Error::Conflict(_))
        ));
    }
}
