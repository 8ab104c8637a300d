use test_utils::prelude::*;

mod create {
    use super::*;

    #[tokio::test]
    async fn success() {
        let app = App::new().await;
        app.add_team("backend", &[("a", true), ("b", true), ("c", true)])
            .await;

        let res = app
            .post("/pullRequest/create")
            .json(&json!({
                "pull_request_id": "pr-1",
                "pull_request_name": "Add search",
                "author_id": "a",
            }))
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::CREATED);

        let body: Value = res.json().await;
        let pr = &body["pr"];

        assert_json_include!(
            actual: pr,
            expected: json!({
                "pull_request_id": "pr-1",
                "pull_request_name": "Add search",
                "author_id": "a",
                "status": "OPEN",
                "mergedAt": null,
            })
        );
        assert!(pr["createdAt"].is_string());
        assert_eq!(reviewers(pr), ["b", "c"]);
    }

    #[tokio::test]
    async fn single_teammate() {
        let app = App::new().await;
        app.add_team("backend", &[("a", true), ("b", true)]).await;

        let pr = app.create_pull_request("pr-1", "a").await;

        assert_eq!(reviewers(&pr), ["b"]);
    }

    #[tokio::test]
    async fn at_most_two_reviewers() {
        let app = App::new().await;
        let members: Vec<String> = (0..6).map(|i| format!("u{i}")).collect();
        let members: Vec<(&str, bool)> = members.iter().map(|id| (id.as_str(), true)).collect();
        app.add_team("backend", &members).await;

        for i in 0..10 {
            let pr = app.create_pull_request(&format!("pr-{i}"), "u0").await;
            let assigned = reviewers(&pr);

            assert_eq!(assigned.len(), 2);
            assert_ne!(assigned[0], assigned[1]);
            assert!(!assigned.contains(&"u0".to_owned()));
        }
    }

    #[tokio::test]
    async fn reviewers_come_from_author_team() {
        let app = App::new().await;
        app.add_team("backend", &[("a", true), ("b", true)]).await;
        app.add_team("frontend", &[("c", true), ("d", true)]).await;

        let pr = app.create_pull_request("pr-1", "a").await;

        assert_eq!(reviewers(&pr), ["b"]);
    }

    #[tokio::test]
    async fn no_teammates() {
        let app = App::new().await;
        app.add_team("solo", &[("a", true)]).await;

        let res = app
            .post("/pullRequest/create")
            .json(&json!({
                "pull_request_id": "pr-1",
                "pull_request_name": "Lonely change",
                "author_id": "a",
            }))
            .send()
            .await;

        assert_error!(res, error::NO_CANDIDATE);

        // nothing was stored, so the same id is still free
        let res = app
            .post("/pullRequest/create")
            .json(&json!({
                "pull_request_id": "pr-1",
                "pull_request_name": "Lonely change",
                "author_id": "a",
            }))
            .send()
            .await;

        assert_error!(res, error::NO_CANDIDATE);
    }

    #[tokio::test]
    async fn only_inactive_teammates() {
        let app = App::new().await;
        app.add_team("backend", &[("a", true), ("b", false), ("c", false)])
            .await;

        let res = app
            .post("/pullRequest/create")
            .json(&json!({
                "pull_request_id": "pr-1",
                "pull_request_name": "Change",
                "author_id": "a",
            }))
            .send()
            .await;

        assert_error!(res, error::NO_CANDIDATE);
    }

    #[tokio::test]
    async fn inactive_author_can_open() {
        let app = App::new().await;
        app.add_team("backend", &[("a", false), ("b", true)]).await;

        let pr = app.create_pull_request("pr-1", "a").await;

        assert_eq!(reviewers(&pr), ["b"]);
    }

    #[tokio::test]
    async fn already_exists() {
        let app = App::new().await;
        app.add_team("backend", &[("a", true), ("b", true), ("c", true)])
            .await;
        let first = app.create_pull_request("pr-1", "a").await;

        let res = app
            .post("/pullRequest/create")
            .json(&json!({
                "pull_request_id": "pr-1",
                "pull_request_name": "Other change",
                "author_id": "b",
            }))
            .send()
            .await;

        assert_error!(res, error::PR_EXISTS);

        for reviewer in reviewers(&first) {
            assert_eq!(app.reviewing(&reviewer).await, ["pr-1"]);
        }
        assert!(app.reviewing("a").await.is_empty());
    }

    #[tokio::test]
    async fn unknown_author() {
        let app = App::new().await;

        let res = app
            .post("/pullRequest/create")
            .json(&json!({
                "pull_request_id": "pr-1",
                "pull_request_name": "Change",
                "author_id": "ghost",
            }))
            .send()
            .await;

        assert_error!(res, error::NOT_FOUND);
    }

    #[tokio::test]
    async fn visible_to_reviewers() {
        let app = App::new().await;
        app.add_team("backend", &[("a", true), ("b", true), ("c", true)])
            .await;

        let pr = app.create_pull_request("pr-1", "a").await;

        for reviewer in reviewers(&pr) {
            assert_eq!(app.reviewing(&reviewer).await, ["pr-1"]);
        }
    }
}

mod merge {
    use super::*;

    #[tokio::test]
    async fn success() {
        let app = App::new().await;
        app.add_team("backend", &[("a", true), ("b", true)]).await;
        app.create_pull_request("pr-1", "a").await;

        let res = app
            .post("/pullRequest/merge")
            .json(&json!({ "pull_request_id": "pr-1" }))
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = res.json().await;
        let pr = &body["pr"];

        assert_eq!(pr["status"], "MERGED");
        assert!(pr["mergedAt"].is_string());
        assert_eq!(reviewers(pr), ["b"]);
    }

    #[tokio::test]
    async fn twice() {
        let app = App::new().await;
        app.add_team("backend", &[("a", true), ("b", true)]).await;
        app.create_pull_request("pr-1", "a").await;
        app.merge_pull_request("pr-1").await;

        let res = app
            .post("/pullRequest/merge")
            .json(&json!({ "pull_request_id": "pr-1" }))
            .send()
            .await;

        assert_error!(res, error::PR_MERGED);
    }

    #[tokio::test]
    async fn unknown_pull_request() {
        let app = App::new().await;

        let res = app
            .post("/pullRequest/merge")
            .json(&json!({ "pull_request_id": "nope" }))
            .send()
            .await;

        assert_error!(res, error::NOT_FOUND);
    }
}
