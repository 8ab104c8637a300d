//! Domain rules for teams, pull requests and reviewer assignment.
//!
//! Services own a [`Storage`](crate::storage::Storage) handed to them on
//! construction and report failures through [`Error`]. Rejections of a
//! request are distinct variants; anything the storage layer reports is
//! folded into [`Error::Internal`].

mod assignment;
mod lifecycle;
mod membership;
mod stats;

pub use assignment::*;
pub use lifecycle::*;
pub use membership::*;
pub use stats::*;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("team {0} already exists")]
    TeamAlreadyExists(String),
    #[error("team {0} not found")]
    TeamNotFound(String),
    #[error("user {0} not found")]
    UserNotFound(String),
    #[error("pull request {0} already exists")]
    PrAlreadyExists(String),
    #[error("pull request {0} not found")]
    PrNotFound(String),
    #[error("pull request {0} is already merged")]
    PrAlreadyMerged(String),
    #[error("user {reviewer_id} is not assigned to pull request {pull_request_id}")]
    ReviewerNotAssigned {
        pull_request_id: String,
        reviewer_id: String,
    },
    #[error("no available reviewers for pull request {0}")]
    NoAvailableReviewers(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
