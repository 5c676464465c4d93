//! World-record progression pipeline.
//!
//! One call to [`build`] takes a raw run collection and produces a complete,
//! immutable chart payload: normalize → scan → resolve labels → materialize →
//! axes. The scan and the materialization are pure and synchronous; the label
//! lookup is the only suspension point. Every recompute starts from scratch —
//! the near-record snapshots taken during the scan are order-sensitive, so the
//! output cannot be patched incrementally.

pub mod axis;
pub mod run;
pub mod scanner;
pub mod series;
pub mod team;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing::{info, instrument};

use crate::prelude::*;
use crate::progression::axis::{DateAxis, DurationAxis};
use crate::progression::scanner::ScanOptions;
use crate::progression::series::Row;
use crate::progression::team::{ResolveDisplayName, TeamKey};
use crate::speedrun::models::RawRun;

/// Pipeline tunables for one recompute cycle.
#[derive(Debug, Clone, Copy)]
pub struct ChartSettings {
    pub wr_runs_only: bool,
    pub floor_year: Option<i32>,
    pub top_n: usize,
    pub tick_count: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            wr_runs_only: false,
            floor_year: None,
            top_n: scanner::DEFAULT_TOP_N,
            tick_count: axis::DEFAULT_TICK_COUNT,
        }
    }
}

/// Complete chart payload for one game/category/filter combination.
#[derive(Serialize, Debug, PartialEq)]
pub struct ChartData {
    pub rows: Vec<Row>,
    pub labels: BTreeMap<TeamKey, String>,
    pub duration_axis: Option<DurationAxis>,
    pub date_axis: Option<DateAxis>,
}

impl ChartData {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Monotonic recompute-cycle counter.
///
/// A cycle publishes its result only if no newer cycle has begun while its
/// label lookups were in flight; a stale batch is dropped on the floor.
#[derive(Default)]
pub struct Generations(AtomicU64);

impl Generations {
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.0.load(Ordering::SeqCst) == generation
    }
}

/// Runs the full pipeline.
///
/// Returns `Ok(None)` when the cycle got superseded by a newer one. An empty
/// or fully filtered-out input yields an empty payload, not an error.
#[instrument(skip_all, fields(n_raw_runs = raw_runs.len()))]
pub async fn build<R: ResolveDisplayName + Sync>(
    resolver: &R,
    generations: &Generations,
    raw_runs: &[RawRun],
    settings: &ChartSettings,
) -> Result<Option<ChartData>> {
    let generation = generations.begin();

    let runs = run::normalize(raw_runs)?;
    let progression = scanner::scan(
        runs,
        ScanOptions {
            wr_runs_only: settings.wr_runs_only,
            floor_year: settings.floor_year,
            top_n: settings.top_n,
        },
    );

    let labels = match team::resolve_labels(resolver, progression.history.keys()).await {
        _ if !generations.is_current(generation) => return Ok(None),
        Ok(labels) => labels,
        Err(error) => return Err(error),
    };

    let rows = series::materialize(&progression, settings.wr_runs_only);
    let times = progression.history.values().flatten().map(|observation| observation.time);
    let duration_axis = axis::duration_axis(times, settings.tick_count);
    let date_axis = axis::date_axis(rows.iter().map(|row| row.date));
    info!(n_rows = rows.len(), n_teams = labels.len(), "chart ready");

    Ok(Some(ChartData { rows, labels, duration_axis, date_axis }))
}
