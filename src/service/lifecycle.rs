use super::{AssignmentEngine, Error, Result};
use crate::{
    domain::{NewPullRequest, PullRequest, PullRequestStatus},
    storage::{self, Storage, Transaction},
};
use anyhow::Context;
use chrono::Utc;
use rand::Rng;

/// Creation, merging and lookup of pull requests.
pub struct PullRequestLifecycle<S> {
    storage: S,
}

impl<S: Storage> PullRequestLifecycle<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persists an open pull request and assigns its initial reviewers.
    ///
    /// Runs in a single transaction: if no reviewer can be assigned nothing
    /// is stored and the same id can be submitted again later.
    pub async fn create<R>(&self, new: NewPullRequest, rng: &mut R) -> Result<PullRequest>
    where
        R: Rng + Send + ?Sized,
    {
        let txn = self
            .storage
            .begin()
            .await
            .context("failed to begin transaction")?;

        if txn
            .pr_exists(&new.id)
            .await
            .context("failed to check pull request existence")?
        {
            return Err(Error::PrAlreadyExists(new.id));
        }

        let author = txn
            .get_user(&new.author_id)
            .await
            .context("failed to get author")?
            .ok_or_else(|| Error::UserNotFound(new.author_id.clone()))?;

        let pull_request = PullRequest {
            id: new.id,
            name: new.name,
            author_id: author.id.clone(),
            status: PullRequestStatus::Open,
            reviewers: Vec::new(),
            created_at: Utc::now(),
            merged_at: None,
        };

        match txn.create_pr(&pull_request).await {
            Err(storage::Error::Conflict(_)) => {
                return Err(Error::PrAlreadyExists(pull_request.id))
            }
            result => result.context("failed to create pull request")?,
        }

        let engine = AssignmentEngine::new(txn);
        let pull_request = engine
            .assign_initial_reviewers(pull_request, &author, rng)
            .await?;

        engine
            .into_storage()
            .commit()
            .await
            .context("failed to commit pull request")?;

        info!(
            pull_request_id = %pull_request.id,
            author_id = %pull_request.author_id,
            reviewers = pull_request.reviewers.len(),
            "pull request created"
        );

        Ok(pull_request)
    }

    pub async fn get(&self, pull_request_id: &str) -> Result<PullRequest> {
        let mut pull_request = self
            .storage
            .get_pr(pull_request_id)
            .await
            .context("failed to get pull request")?
            .ok_or_else(|| Error::PrNotFound(pull_request_id.to_owned()))?;

        pull_request.reviewers = self
            .storage
            .get_reviewers(pull_request_id)
            .await
            .context("failed to get reviewers")?;

        Ok(pull_request)
    }

    /// Marks an open pull request as merged. Merging is one-way: a second
    /// merge is rejected with [`Error::PrAlreadyMerged`].
    pub async fn merge(&self, pull_request_id: &str) -> Result<PullRequest> {
        let pull_request = self.get(pull_request_id).await?;

        if pull_request.is_merged() {
            return Err(Error::PrAlreadyMerged(pull_request.id));
        }

        let mut merged = match self.storage.merge_pr(pull_request_id).await {
            Err(storage::Error::Conflict(_)) => {
                return Err(Error::PrAlreadyMerged(pull_request.id))
            }
            result => result.context("failed to merge pull request")?,
        };
        merged.reviewers = pull_request.reviewers;

        info!(pull_request_id, "pull request merged");

        Ok(merged)
    }

    /// Pull requests the user is assigned to review, without reviewer lists.
    pub async fn list_reviewing(&self, user_id: &str) -> Result<Vec<PullRequest>> {
        if !self
            .storage
            .user_exists(user_id)
            .await
            .context("failed to check user existence")?
        {
            return Err(Error::UserNotFound(user_id.to_owned()));
        }

        let pull_requests = self
            .storage
            .get_prs_reviewed_by(user_id)
            .await
            .context("failed to get reviewed pull requests")?;

        Ok(pull_requests)
    }
}
