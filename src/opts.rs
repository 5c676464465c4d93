//! CLI options.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::prelude::*;
use crate::progression::{axis, scanner};

#[derive(Parser)]
#[command(version, about)]
pub struct Opts {
    /// Sentry DSN
    #[arg(long, env = "SPEEDRUN_DASHBOARD_SENTRY_DSN")]
    pub sentry_dsn: Option<String>,

    /// Sentry performance tracing sample rate
    #[arg(long, default_value_t = 0.0)]
    pub traces_sample_rate: f32,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand)]
pub enum Subcommand {
    /// Searches speedrun.com games by name
    SearchGames(SearchGamesOpts),

    /// Lists a game's categories together with their variables
    ListCategories(ListCategoriesOpts),

    /// Builds the world-record progression chart payload
    Chart(ChartOpts),
}

#[derive(Args)]
pub struct SearchGamesOpts {
    /// Game name to search for
    pub query: String,
}

#[derive(Args)]
pub struct ListCategoriesOpts {
    /// Game ID
    #[arg(long)]
    pub game: String,
}

#[derive(Args)]
pub struct ChartOpts {
    /// Game ID
    #[arg(long)]
    pub game: String,

    /// Category ID
    #[arg(long)]
    pub category: String,

    /// Variable filter as `variable-id=value-id`, may be repeated.
    /// An empty value-id means «no constraint for this variable»
    #[arg(long = "var", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Keeps only the record-breaking runs themselves
    #[arg(long)]
    pub wr_runs_only: bool,

    /// Drops runs submitted before this year, defaults to the game's release year
    #[arg(long)]
    pub floor_year: Option<i32>,

    /// Number of near-record teams snapshotted at each record break
    #[arg(long, default_value_t = scanner::DEFAULT_TOP_N, value_parser = parse_count)]
    pub top_n: usize,

    /// Target number of ticks on the duration axis
    #[arg(long, default_value_t = axis::DEFAULT_TICK_COUNT, value_parser = parse_count)]
    pub tick_count: usize,

    /// Writes the chart payload to the file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

fn parse_filter(value: &str) -> Result<(String, String)> {
    match value.split_once('=') {
        Some((variable_id, value_id)) if !variable_id.is_empty() => {
            Ok((variable_id.to_string(), value_id.to_string()))
        }
        _ => Err(anyhow!("expected `variable-id=value-id`, got `{}`", value)),
    }
}

fn parse_count(value: &str) -> Result<usize> {
    match value.parse()? {
        count if count >= 1 => Ok(count),
        _ => Err(anyhow!("expected a positive count")),
    }
}
