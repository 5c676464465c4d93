use clap::Parser;

use crate::opts::{Opts, Subcommand};
use crate::prelude::*;
use crate::speedrun::SpeedrunApi;

mod chart;
mod games;
mod logging;
mod opts;
mod prelude;
mod progression;
mod speedrun;

#[tokio::main]
async fn main() -> Result {
    let opts = Opts::parse();
    let _sentry_guard = logging::init(opts.sentry_dsn.clone(), opts.traces_sample_rate)?;
    let api = SpeedrunApi::new()?;
    match opts.subcommand {
        Subcommand::SearchGames(opts) => games::search(&api, opts).await,
        Subcommand::ListCategories(opts) => games::categories(&api, opts).await,
        Subcommand::Chart(opts) => chart::run(&api, opts).await,
    }
}
