//! The single-pass world-record scan.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::prelude::*;
use crate::progression::run::{self, Run};
use crate::progression::team::{team_key, TeamKey};

/// Default number of near-record teams snapshotted at each record break.
pub const DEFAULT_TOP_N: usize = 5;

/// One qualifying appearance of a team in the tracked history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub time: f64,
    pub date: DateTime,
}

/// Scan output: per-team observation history plus the instants at which each
/// team authored a new record. `wr_breaks` contains genuine record-breaking
/// submissions only, never ordinary observations.
#[derive(Debug, Default, PartialEq)]
pub struct Progression {
    pub history: BTreeMap<TeamKey, Vec<Observation>>,
    pub wr_breaks: BTreeMap<TeamKey, BTreeSet<DateTime>>,
}

impl Progression {
    #[must_use]
    pub fn observation_count(&self) -> usize {
        self.history.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    /// Track only the record-breaking runs themselves, skipping the
    /// near-record snapshots.
    pub wr_runs_only: bool,

    /// Drop runs submitted before this year.
    pub floor_year: Option<i32>,

    /// Size of the near-record snapshot taken at each break.
    pub top_n: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            wr_runs_only: false,
            floor_year: None,
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Single forward pass over the chronologically ordered runs.
///
/// A run breaks the record only on a strict improvement; an exact tie is
/// inert — the earliest run to reach a time keeps sole ownership of the
/// record at that time. Runs with a zero or non-finite ranking time, and runs
/// without a valid team, are skipped without touching any state. The first
/// qualifying run always breaks, since the record starts at infinity.
#[instrument(skip_all, fields(n_runs = runs.len()))]
pub fn scan(runs: Vec<Run>, options: ScanOptions) -> Progression {
    let runs = chronological(runs, options.floor_year);

    let mut record_time = f64::INFINITY;
    let mut best_so_far: BTreeMap<TeamKey, Observation> = BTreeMap::new();
    let mut progression = Progression::default();

    for run in &runs {
        let time = run.realtime_secs;
        if !time.is_finite() || time == 0.0 {
            continue;
        }
        let key = team_key(&run.player_ids);
        if key.is_empty() {
            continue;
        }

        if time < record_time {
            if !options.wr_runs_only {
                // Who was near the record right before it fell. A team showing
                // up in consecutive snapshots accumulates duplicate
                // observations; that is the accepted behavior.
                for (team, best) in near_record_teams(&best_so_far, options.top_n) {
                    progression.history.entry(team).or_default().push(best);
                }
            }
            let observation = Observation { time, date: run.submitted_at };
            progression.history.entry(key.clone()).or_default().push(observation);
            progression.wr_breaks.entry(key.clone()).or_default().insert(run.submitted_at);
            debug!(team = key.as_str(), time, "record break");
            record_time = time;
        }

        match best_so_far.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(Observation { time, date: run.submitted_at });
            }
            Entry::Occupied(mut entry) if time < entry.get().time => {
                entry.insert(Observation { time, date: run.submitted_at });
            }
            Entry::Occupied(_) => {}
        }
    }

    progression
}

/// Stable chronological ordering with the optional floor-year cutoff, so that
/// repeated inputs produce repeated output.
fn chronological(mut runs: Vec<Run>, floor_year: Option<i32>) -> Vec<Run> {
    runs.sort_by_key(|run| run.submitted_at);
    match floor_year {
        Some(year) => run::since_year(runs, year),
        None => runs,
    }
}

/// Snapshot of the `top_n` best teams so far, ascending by time. The sort is
/// stable over the key-ordered map, so equal times break ties by team key.
fn near_record_teams(
    best_so_far: &BTreeMap<TeamKey, Observation>,
    top_n: usize,
) -> Vec<(TeamKey, Observation)> {
    let mut teams = best_so_far
        .iter()
        .map(|(team, best)| (team.clone(), *best))
        .collect_vec();
    teams.sort_by(|(_, left), (_, right)| left.time.total_cmp(&right.time));
    teams.truncate(top_n);
    teams
}
