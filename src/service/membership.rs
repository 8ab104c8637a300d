use super::{Error, Result};
use crate::{
    domain::{NewTeam, Team, User},
    storage::{self, Storage, Transaction},
};
use anyhow::Context;
use chrono::Utc;
use std::collections::HashSet;

/// Team registration and user activity.
pub struct MembershipRegistry<S> {
    storage: S,
}

impl<S: Storage> MembershipRegistry<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Creates the team and registers its members that are not known yet.
    ///
    /// Users that already exist keep their record untouched, including their
    /// team, so the returned team only lists the members that actually
    /// belong to it.
    pub async fn add_team(&self, team: NewTeam) -> Result<Team> {
        let txn = self
            .storage
            .begin()
            .await
            .context("failed to begin transaction")?;

        if txn
            .team_exists(&team.name)
            .await
            .context("failed to check team existence")?
        {
            return Err(Error::TeamAlreadyExists(team.name));
        }

        match txn.add_team(&team.name).await {
            Err(storage::Error::Conflict(_)) => return Err(Error::TeamAlreadyExists(team.name)),
            result => result.context("failed to add team")?,
        };

        let now = Utc::now();
        let mut seen = HashSet::new();
        let mut new_members = Vec::with_capacity(team.members.len());

        for member in team.members {
            if !seen.insert(member.id.clone()) {
                continue;
            }

            if txn
                .user_exists(&member.id)
                .await
                .context("failed to check user existence")?
            {
                debug!(user_id = %member.id, "user already exists, skipping");
                continue;
            }

            new_members.push(User {
                id: member.id,
                username: member.username,
                team_name: team.name.clone(),
                is_active: member.is_active,
                created_at: now,
                updated_at: now,
            });
        }

        txn.add_users(&new_members)
            .await
            .context("failed to add team members")?;

        let created = txn
            .get_team(&team.name)
            .await
            .context("failed to load team")?
            .ok_or_else(|| Error::TeamNotFound(team.name.clone()))?;

        txn.commit().await.context("failed to commit team")?;

        info!(
            team_name = %created.name,
            new_members = new_members.len(),
            "team created"
        );

        Ok(created)
    }

    pub async fn get_team(&self, name: &str) -> Result<Team> {
        self.storage
            .get_team(name)
            .await
            .context("failed to get team")?
            .ok_or_else(|| Error::TeamNotFound(name.to_owned()))
    }

    /// Toggles the activity flag. Existing reviewer assignments of the user
    /// are left in place.
    pub async fn set_user_active(&self, user_id: &str, is_active: bool) -> Result<User> {
        if !self
            .storage
            .user_exists(user_id)
            .await
            .context("failed to check user existence")?
        {
            return Err(Error::UserNotFound(user_id.to_owned()));
        }

        let user = self
            .storage
            .set_user_active(user_id, is_active)
            .await
            .context("failed to update user")?
            .ok_or_else(|| Error::UserNotFound(user_id.to_owned()))?;

        info!(user_id, is_active, "user activity changed");

        Ok(user)
    }
}
