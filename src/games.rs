//! Game browsing commands.

use futures::future::try_join_all;
use itertools::Itertools;

use crate::opts::{ListCategoriesOpts, SearchGamesOpts};
use crate::prelude::*;
use crate::speedrun::SpeedrunApi;

pub async fn search(api: &SpeedrunApi, opts: SearchGamesOpts) -> Result {
    let games = api.search_games(&opts.query).await?;
    if games.is_empty() {
        println!("no games match `{}`", opts.query);
        return Ok(());
    }
    for game in games {
        let platforms = try_join_all(
            game.platforms.iter().map(|platform_id| api.get_platform_name(platform_id)),
        )
        .await?;
        println!(
            "{} {} ({}) [{}]",
            game.id,
            game.names.international,
            game.released,
            platforms.join(", "),
        );
    }
    Ok(())
}

pub async fn categories(api: &SpeedrunApi, opts: ListCategoriesOpts) -> Result {
    for category in api.get_categories(&opts.game).await? {
        println!("{} {}", category.id, category.name);
        for variable in api.get_variables(&category.id).await? {
            let values = variable
                .values
                .by_id
                .iter()
                .sorted_by(|(left, _), (right, _)| left.cmp(right))
                .map(|(value_id, value)| format!("{}={}", value_id, value.label))
                .join(", ");
            println!("  {} {}: {}", variable.id, variable.name, values);
        }
    }
    Ok(())
}
