use super::Result;
use crate::{domain::Stats, storage::Storage};
use anyhow::Context;

/// Aggregated counters over users, teams and reviewer assignments.
pub async fn collect_stats<S: Storage>(storage: &S) -> Result<Stats> {
    let stats = storage.stats().await.context("failed to collect stats")?;
    Ok(stats)
}
