//! Canonical run representation.

use crate::prelude::*;
use crate::speedrun::models::RawRun;

/// A submitted run reduced to the fields the record scan needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub id: String,
    pub submitted_at: DateTime,
    pub player_ids: Vec<String>,

    /// Real-time duration in seconds, the ranking metric. Zero or non-finite
    /// marks the run as invalid for ranking.
    pub realtime_secs: f64,
}

impl Run {
    #[must_use]
    pub fn year(&self) -> i32 {
        self.submitted_at.year()
    }
}

impl TryFrom<&RawRun> for Run {
    type Error = anyhow::Error;

    fn try_from(raw: &RawRun) -> Result<Self> {
        let submitted = raw
            .submitted
            .as_deref()
            .with_context(|| format!("run `{}` is missing its submission date", raw.id))?;
        let submitted_at = chrono::DateTime::parse_from_rfc3339(submitted)
            .with_context(|| format!("run `{}` has a malformed submission date", raw.id))?
            .with_timezone(&Utc);
        Ok(Self {
            id: raw.id.clone(),
            submitted_at,
            player_ids: raw.player_ids(),
            realtime_secs: raw.times.realtime_t,
        })
    }
}

/// Converts raw API entries into canonical runs, failing fast on a missing or
/// malformed submission date — defaulting would corrupt the chronological
/// ordering. Order is preserved; nothing is filtered or sorted here.
pub fn normalize(raw_runs: &[RawRun]) -> Result<Vec<Run>> {
    raw_runs.iter().map(Run::try_from).collect()
}

/// Stable minimum-year filter.
pub fn since_year(runs: Vec<Run>, year: i32) -> Vec<Run> {
    runs.into_iter().filter(|run| run.year() >= year).collect()
}
