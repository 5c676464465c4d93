//! The `chart` subcommand: fetch runs, derive the WR progression, emit the
//! chart payload as JSON for an external renderer.

use tracing::{info, warn};

use crate::opts::ChartOpts;
use crate::prelude::*;
use crate::progression::{self, ChartSettings, Generations};
use crate::speedrun::SpeedrunApi;

pub async fn run(api: &SpeedrunApi, opts: ChartOpts) -> Result {
    let game = api.get_game(&opts.game).await?;
    let floor_year = opts.floor_year.unwrap_or(game.released);
    info!(game = game.names.international.as_str(), floor_year, "fetching runs…");
    let raw_runs = api.get_runs(&opts.game, &opts.category, &opts.filters).await?;

    let settings = ChartSettings {
        wr_runs_only: opts.wr_runs_only,
        floor_year: Some(floor_year),
        top_n: opts.top_n,
        tick_count: opts.tick_count,
    };
    let generations = Generations::default();
    let chart = match progression::build(api, &generations, &raw_runs, &settings).await? {
        Some(chart) => chart,
        // A one-shot invocation has nothing to supersede it.
        None => return Ok(()),
    };
    if chart.is_empty() {
        warn!("no runs match the category and filter set");
    }

    let payload = serde_json::to_string_pretty(&chart)?;
    match opts.output {
        Some(path) => std::fs::write(&path, payload)
            .with_context(|| format!("failed to write `{}`", path.display()))?,
        None => println!("{}", payload),
    }
    Ok(())
}
