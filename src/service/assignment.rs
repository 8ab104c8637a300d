use super::{Error, Result};
use crate::{
    domain::{PullRequest, User},
    storage::Storage,
};
use anyhow::Context;
use rand::{seq::SliceRandom, Rng};
use std::collections::HashSet;

/// Upper bound of reviewers picked for a new pull request.
pub const MAX_REVIEWERS: usize = 2;

/// Picks reviewers for new pull requests and replaces assigned ones.
pub struct AssignmentEngine<S> {
    storage: S,
}

impl<S: Storage> AssignmentEngine<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Assigns up to [`MAX_REVIEWERS`] active teammates of `author` to a
    /// freshly persisted pull request and returns it with its reviewers.
    pub async fn assign_initial_reviewers<R>(
        &self,
        mut pull_request: PullRequest,
        author: &User,
        rng: &mut R,
    ) -> Result<PullRequest>
    where
        R: Rng + Send + ?Sized,
    {
        let candidates: Vec<User> = self
            .storage
            .get_active_users_by_team(&author.team_name)
            .await
            .context("failed to get reviewer candidates")?
            .into_iter()
            .filter(|user| user.id != author.id)
            .collect();

        if candidates.is_empty() {
            warn!(
                pull_request_id = %pull_request.id,
                team_name = %author.team_name,
                "no reviewer candidates"
            );
            return Err(Error::NoAvailableReviewers(pull_request.id));
        }

        let reviewer_ids: Vec<String> = sample_reviewers(&candidates, rng)
            .into_iter()
            .map(|user| user.id.clone())
            .collect();

        self.storage
            .assign_reviewers(&pull_request.id, &reviewer_ids)
            .await
            .context("failed to assign reviewers")?;

        pull_request.reviewers = self
            .storage
            .get_reviewers(&pull_request.id)
            .await
            .context("failed to get reviewers")?;

        debug!(
            pull_request_id = %pull_request.id,
            ?reviewer_ids,
            "reviewers assigned"
        );

        Ok(pull_request)
    }

    /// Replaces `old_reviewer_id` on an open pull request with another active
    /// member of the old reviewer's team.
    ///
    /// Returns the updated pull request and the id of the new reviewer.
    pub async fn reassign_reviewer(
        &self,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<(PullRequest, String)> {
        let mut pull_request = self
            .storage
            .get_pr(pull_request_id)
            .await
            .context("failed to get pull request")?
            .ok_or_else(|| Error::PrNotFound(pull_request_id.to_owned()))?;

        if pull_request.is_merged() {
            return Err(Error::PrAlreadyMerged(pull_request.id));
        }

        let old_reviewer = self
            .storage
            .get_user(old_reviewer_id)
            .await
            .context("failed to get reviewer")?
            .ok_or_else(|| Error::UserNotFound(old_reviewer_id.to_owned()))?;

        if !self
            .storage
            .is_reviewer_assigned(&pull_request.id, &old_reviewer.id)
            .await
            .context("failed to check reviewer assignment")?
        {
            return Err(Error::ReviewerNotAssigned {
                pull_request_id: pull_request.id,
                reviewer_id: old_reviewer.id,
            });
        }

        let assigned = self
            .storage
            .get_reviewers(&pull_request.id)
            .await
            .context("failed to get reviewers")?;

        let excluded: HashSet<&str> = assigned
            .iter()
            .map(|reviewer| reviewer.id.as_str())
            .chain([pull_request.author_id.as_str(), old_reviewer.id.as_str()])
            .collect();

        let candidates = self
            .storage
            .get_active_users_by_team(&old_reviewer.team_name)
            .await
            .context("failed to get reviewer candidates")?;

        let Some(replacement) = pick_replacement(&candidates, &excluded) else {
            warn!(
                pull_request_id = %pull_request.id,
                team_name = %old_reviewer.team_name,
                "no replacement reviewer"
            );
            return Err(Error::NoAvailableReviewers(pull_request.id));
        };
        let replacement = replacement.id.clone();

        self.storage
            .reassign_reviewer(&pull_request.id, &replacement, &old_reviewer.id)
            .await
            .context("failed to reassign reviewer")?;

        pull_request.reviewers = self
            .storage
            .get_reviewers(&pull_request.id)
            .await
            .context("failed to get reviewers")?;

        info!(
            pull_request_id = %pull_request.id,
            old_reviewer_id = %old_reviewer.id,
            new_reviewer_id = %replacement,
            "reviewer reassigned"
        );

        Ok((pull_request, replacement))
    }
}

/// Uniformly samples at most [`MAX_REVIEWERS`] distinct candidates.
pub(crate) fn sample_reviewers<'a, R>(candidates: &'a [User], rng: &mut R) -> Vec<&'a User>
where
    R: Rng + ?Sized,
{
    if candidates.len() <= MAX_REVIEWERS {
        return candidates.iter().collect();
    }

    candidates.choose_multiple(rng, MAX_REVIEWERS).collect()
}

/// First candidate, in the storage's order, that is not excluded.
pub(crate) fn pick_replacement<'a>(
    candidates: &'a [User],
    excluded: &HashSet<&str>,
) -> Option<&'a User> {
    candidates
        .iter()
        .find(|candidate| !excluded.contains(candidate.id.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn user(id: &str) -> User {
        let now = Utc::now();
        User {
            id: id.to_owned(),
            username: id.to_uppercase(),
            team_name: "backend".to_owned(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn ids(users: &[&User]) -> Vec<String> {
        users.iter().map(|user| user.id.clone()).collect()
    }

    #[test]
    fn sample_keeps_small_pools() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);

        assert!(sample_reviewers(&[], &mut rng).is_empty());

        let one = [user("u1")];
        assert_eq!(ids(&sample_reviewers(&one, &mut rng)), ["u1"]);

        let two = [user("u1"), user("u2")];
        assert_eq!(ids(&sample_reviewers(&two, &mut rng)), ["u1", "u2"]);
    }

    #[test]
    fn sample_picks_two_distinct_candidates() {
        let pool: Vec<User> = (0..6).map(|i| user(&format!("u{i}"))).collect();
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        for _ in 0..100 {
            let picked = ids(&sample_reviewers(&pool, &mut rng));

            assert_eq!(picked.len(), MAX_REVIEWERS);
            assert_ne!(picked[0], picked[1]);
            assert!(picked.iter().all(|id| pool.iter().any(|user| &user.id == id)));
        }
    }

    #[test]
    fn sample_reaches_every_candidate() {
        let pool: Vec<User> = (0..4).map(|i| user(&format!("u{i}"))).collect();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut seen = HashSet::new();

        for _ in 0..200 {
            seen.extend(ids(&sample_reviewers(&pool, &mut rng)));
        }

        assert_eq!(seen.len(), pool.len());
    }

    #[test]
    fn replacement_skips_excluded() {
        let pool = [user("a"), user("b"), user("c"), user("d")];
        let excluded = HashSet::from(["a", "b", "c"]);

        let picked = pick_replacement(&pool, &excluded).map(|user| user.id.as_str());
        assert_eq!(picked, Some("d"));
    }

    #[test]
    fn replacement_none_when_everyone_excluded() {
        let pool = [user("a"), user("b")];
        let excluded = HashSet::from(["a", "b"]);

        assert!(pick_replacement(&pool, &excluded).is_none());
    }
}
