mod db;
pub mod macros;
pub mod prelude;
mod request;
mod response;

pub use db::setup_database;
pub use macros::macro_support;
use request::RequestBuilder;
use reqwest::Client;
use reviewer_service::State;
use serde_json::{json, Value};
use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
    time::Duration,
};
use tokio::{net::TcpListener, sync::oneshot};
use uuid::Uuid;

#[derive(Debug)]
pub struct AppInner {
    addr: SocketAddr,
}

/// A running instance of the service backed by its own in-memory database.
#[derive(Clone, Debug)]
pub struct App {
    inner: Arc<AppInner>,
    client: Client,
}

impl App {
    pub async fn new() -> Self {
        let (tx, rx) = oneshot::channel();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to create tokio runtime");

            rt.block_on(async {
                tracing::trace!("setting up database");

                let conn = setup_database().await;

                tracing::trace!("binding socket");

                let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, 0));
                let listener = TcpListener::bind(addr)
                    .await
                    .expect("failed to bind tcp listener");
                let state = State::with_database(conn);

                let inner = Arc::new(AppInner {
                    addr: listener.local_addr().expect("listener has no address"),
                });

                tx.send(inner).expect("test dropped before the app started");

                tracing::trace!("starting app");

                reviewer_service::run(listener, state, Duration::from_secs(1))
                    .await
                    .expect("app stopped with an error");
            });
        });

        App {
            inner: rx.await.expect("app thread exited before starting"),
            client: Client::new(),
        }
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(self.client.get(self.url(url)))
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(self.client.post(self.url(url)))
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.inner.addr, path)
    }

    /// Adds a team through the API. Members are `(user_id, is_active)`
    /// pairs, usernames are derived from the ids.
    pub async fn add_team(&self, team_name: &str, members: &[(&str, bool)]) -> Value {
        let members: Vec<Value> = members
            .iter()
            .map(|(user_id, is_active)| {
                json!({
                    "user_id": user_id,
                    "username": format!("User {user_id}"),
                    "is_active": is_active,
                })
            })
            .collect();

        let res = self
            .post("/team/add")
            .json(&json!({
                "team_name": team_name,
                "members": members,
            }))
            .send()
            .await;

        assert_eq!(res.status(), http::StatusCode::CREATED);

        res.json().await
    }

    /// Opens a pull request through the API and returns the `pr` object.
    pub async fn create_pull_request(&self, pull_request_id: &str, author_id: &str) -> Value {
        let res = self
            .post("/pullRequest/create")
            .json(&json!({
                "pull_request_id": pull_request_id,
                "pull_request_name": format!("Change {pull_request_id}"),
                "author_id": author_id,
            }))
            .send()
            .await;

        assert_eq!(res.status(), http::StatusCode::CREATED);

        let mut body: Value = res.json().await;
        body["pr"].take()
    }

    pub async fn merge_pull_request(&self, pull_request_id: &str) -> Value {
        let res = self
            .post("/pullRequest/merge")
            .json(&json!({ "pull_request_id": pull_request_id }))
            .send()
            .await;

        assert_eq!(res.status(), http::StatusCode::OK);

        let mut body: Value = res.json().await;
        body["pr"].take()
    }

    pub async fn set_is_active(&self, user_id: &str, is_active: bool) {
        let res = self
            .post("/users/setIsActive")
            .json(&json!({ "user_id": user_id, "is_active": is_active }))
            .send()
            .await;

        assert_eq!(res.status(), http::StatusCode::OK);
    }

    /// Ids of the pull requests `user_id` is reviewing.
    pub async fn reviewing(&self, user_id: &str) -> Vec<String> {
        let res = self
            .get("/users/getReview")
            .query(&[("user_id", user_id)])
            .send()
            .await;

        assert_eq!(res.status(), http::StatusCode::OK);

        let body: Value = res.json().await;
        body["pull_requests"]
            .as_array()
            .expect("pull_requests is not an array")
            .iter()
            .map(|pr| pr["pull_request_id"].as_str().unwrap_or_default().to_owned())
            .collect()
    }
}

/// Reviewer ids of a `pr` object, sorted.
pub fn reviewers(pr: &Value) -> Vec<String> {
    let mut reviewers: Vec<String> = pr["assigned_reviewers"]
        .as_array()
        .expect("assigned_reviewers is not an array")
        .iter()
        .map(|id| id.as_str().expect("reviewer id is not a string").to_owned())
        .collect();
    reviewers.sort();
    reviewers
}

pub fn uuid() -> String {
    Uuid::new_v4()
        .as_simple()
        .encode_lower(&mut Uuid::encode_buffer())
        .to_owned()
}
