//! Team identity and display labels.

use std::collections::BTreeMap;

use async_trait::async_trait;
use futures::future::try_join_all;
use itertools::Itertools;

use crate::prelude::*;

/// Canonical, order-independent team identity: the sorted participant IDs
/// joined by a single space. The empty key means «no valid team» and callers
/// must drop such runs from ranking.
pub type TeamKey = String;

pub const KEY_SEPARATOR: &str = " ";
pub const LABEL_SEPARATOR: &str = " + ";

/// Derives the team key for a run's participant set.
#[must_use]
pub fn team_key(player_ids: &[String]) -> TeamKey {
    player_ids.iter().sorted().join(KEY_SEPARATOR)
}

/// External display-name lookup — the only network-bound operation in the
/// pipeline.
#[async_trait]
pub trait ResolveDisplayName {
    /// Resolves a participant ID to a human-readable name, failing when the ID
    /// is unknown.
    async fn resolve_display_name(&self, user_id: &str) -> Result<String>;
}

/// Resolves chart labels for the given team keys.
///
/// Issues one lookup per **distinct** participant ID, runs them concurrently
/// and waits for the whole batch: either every team gets a label or the call
/// fails. Names are joined with [`LABEL_SEPARATOR`] in key order.
pub async fn resolve_labels<R>(
    resolver: &R,
    keys: impl IntoIterator<Item = &TeamKey>,
) -> Result<BTreeMap<TeamKey, String>>
where
    R: ResolveDisplayName + Sync,
{
    let keys = keys.into_iter().collect_vec();
    let user_ids = keys
        .iter()
        .flat_map(|key| key.split(KEY_SEPARATOR))
        .filter(|user_id| !user_id.is_empty())
        .unique()
        .collect_vec();
    let names: AHashMap<&str, String> = try_join_all(user_ids.into_iter().map(|user_id| async move {
        resolver.resolve_display_name(user_id).await.map(|name| (user_id, name))
    }))
    .await?
    .into_iter()
    .collect();

    let mut labels = BTreeMap::new();
    for key in keys {
        let mut member_names = Vec::new();
        for user_id in key.split(KEY_SEPARATOR).filter(|user_id| !user_id.is_empty()) {
            let name = names
                .get(user_id)
                .ok_or_else(|| anyhow!("no display name for `{}`", user_id))?;
            member_names.push(name.as_str());
        }
        labels.insert(key.clone(), member_names.join(LABEL_SEPARATOR));
    }
    Ok(labels)
}
