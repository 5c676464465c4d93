//! Thin speedrun.com REST API client.
//!
//! See <https://github.com/speedruncomorg/api/tree/master/version1>.

pub mod models;
pub mod response;

use async_trait::async_trait;
use clap::{crate_name, crate_version};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::logging::format_elapsed;
use crate::prelude::*;
use crate::progression::team::ResolveDisplayName;
use crate::speedrun::models::{Category, Game, Platform, RawRun, User, Variable};
use crate::speedrun::response::{Envelope, Page};

const BASE_URL: &str = "https://www.speedrun.com/api/v1";

/// Runs per page; the upstream maximum.
const PAGE_SIZE: &str = "200";

#[derive(Clone)]
pub struct SpeedrunApi {
    client: reqwest::Client,
}

impl SpeedrunApi {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(crate_name!(), "/", crate_version!()))
            .timeout(StdDuration::from_secs(30))
            .build()?;
        Ok(Self { client })
    }

    /// See <https://github.com/speedruncomorg/api/blob/master/version1/games.md#get-games>.
    pub async fn search_games(&self, name: &str) -> Result<Vec<Game>> {
        let url = Url::parse_with_params(&format!("{}/games", BASE_URL), &[("name", name)])?;
        Ok(self.get::<Page<Game>>(url).await?.data)
    }

    /// See <https://github.com/speedruncomorg/api/blob/master/version1/games.md#get-gamesid>.
    pub async fn get_game(&self, game_id: &str) -> Result<Game> {
        let url = Url::parse(&format!("{}/games/{}", BASE_URL, game_id))?;
        Ok(self.get::<Envelope<Game>>(url).await?.data)
    }

    /// See <https://github.com/speedruncomorg/api/blob/master/version1/categories.md>.
    pub async fn get_categories(&self, game_id: &str) -> Result<Vec<Category>> {
        let url = Url::parse(&format!("{}/games/{}/categories", BASE_URL, game_id))?;
        Ok(self.get::<Envelope<Vec<Category>>>(url).await?.data)
    }

    /// See <https://github.com/speedruncomorg/api/blob/master/version1/variables.md>.
    pub async fn get_variables(&self, category_id: &str) -> Result<Vec<Variable>> {
        let url = Url::parse(&format!("{}/categories/{}/variables", BASE_URL, category_id))?;
        Ok(self.get::<Envelope<Vec<Variable>>>(url).await?.data)
    }

    /// See <https://github.com/speedruncomorg/api/blob/master/version1/platforms.md>.
    pub async fn get_platform_name(&self, platform_id: &str) -> Result<String> {
        let url = Url::parse(&format!("{}/platforms/{}", BASE_URL, platform_id))?;
        Ok(self.get::<Envelope<Platform>>(url).await?.data.name)
    }

    /// Resolves a user's display name.
    ///
    /// See <https://github.com/speedruncomorg/api/blob/master/version1/users.md#get-usersid>.
    pub async fn get_display_name(&self, user_id: &str) -> Result<String> {
        let url = Url::parse(&format!("{}/users/{}", BASE_URL, user_id))?;
        let user = self
            .get::<Envelope<User>>(url)
            .await
            .with_context(|| format!("failed to look up user `{}`", user_id))?;
        Ok(user.data.names.international)
    }

    /// Fetches **all** runs of the game and category, transparently following
    /// the pagination links. Filters are passed upstream as
    /// `var-{variable-id}={value-id}` query parameters; an entry with an empty
    /// value means «no constraint for this variable» and is not sent at all.
    ///
    /// See <https://github.com/speedruncomorg/api/blob/master/version1/runs.md#get-runs>.
    pub async fn get_runs(
        &self,
        game_id: &str,
        category_id: &str,
        filters: &[(String, String)],
    ) -> Result<Vec<RawRun>> {
        let mut params = vec![
            ("game".to_string(), game_id.to_string()),
            ("category".to_string(), category_id.to_string()),
            ("max".to_string(), PAGE_SIZE.to_string()),
        ];
        for (variable_id, value_id) in filters {
            if value_id.is_empty() {
                continue;
            }
            params.push((format!("var-{}", variable_id), value_id.clone()));
        }

        let mut url = Url::parse_with_params(&format!("{}/runs", BASE_URL), &params)?;
        let mut runs = Vec::new();
        loop {
            let page = self.get::<Page<RawRun>>(url).await?;
            runs.extend(page.data);
            match page.pagination.next_uri() {
                Some(next_uri) => url = Url::parse(next_uri)?,
                None => break,
            }
        }
        debug!(n_runs = runs.len(), "all pages fetched");
        Ok(runs)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");
        let start_instant = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("request has failed")?
            .error_for_status()?;
        debug!(elapsed = format_elapsed(start_instant).as_str(), "got response");
        response.json().await.context("could not parse JSON")
    }
}

#[async_trait]
impl ResolveDisplayName for SpeedrunApi {
    async fn resolve_display_name(&self, user_id: &str) -> Result<String> {
        self.get_display_name(user_id).await
    }
}
