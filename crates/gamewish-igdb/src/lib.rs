// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! IGDB game catalog adapter for the Gamewish bot.
//!
//! Implements [`GameSearch`] on top of the IGDB v4 `games` endpoint.

pub mod client;
pub mod types;

use async_trait::async_trait;
use gamewish_config::model::IgdbConfig;
use gamewish_core::error::GamewishError;
use gamewish_core::traits::{GameSearch, PluginAdapter};
use gamewish_core::types::{AdapterType, Game, HealthStatus, SearchResult};
use tracing::{debug, info};

use crate::client::IgdbClient;

/// IGDB-backed catalog search.
pub struct IgdbSearch {
    client: IgdbClient,
    result_limit: u32,
}

impl IgdbSearch {
    /// Creates the adapter. `client_id` and `access_token` are required.
    pub fn new(config: &IgdbConfig) -> Result<Self, GamewishError> {
        let client_id = required(&config.client_id, "igdb.client_id")?;
        let access_token = required(&config.access_token, "igdb.access_token")?;
        let client = IgdbClient::new(
            client_id,
            &config.token_type,
            access_token,
            &config.base_url,
        )?;
        info!(base_url = %config.base_url, "IGDB search initialized");
        Ok(Self {
            client,
            result_limit: config.result_limit,
        })
    }
}

fn required<'a>(value: &'a Option<String>, key: &str) -> Result<&'a str, GamewishError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(GamewishError::Config(format!(
            "{key} is required for IGDB search"
        ))),
    }
}

/// Search query over main games only. Double quotes would end the search string.
pub fn search_query(text: &str, limit: u32) -> String {
    let text = text.replace('"', "");
    format!(
        "search \"{text}\"; fields id,name,first_release_date; \
         where version_parent = null & game_type = 0; limit {limit};"
    )
}

/// Detail query expanding per-platform release dates.
pub fn detail_query(id: i64) -> String {
    format!(
        "fields id,name,url,release_dates.date,release_dates.platform.abbreviation,\
         release_dates.platform.name; where id = {id};"
    )
}

#[async_trait]
impl PluginAdapter for IgdbSearch {
    fn name(&self) -> &str {
        "igdb"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Search
    }

    async fn health_check(&self) -> Result<HealthStatus, GamewishError> {
        match self.client.query_games("fields id; limit 1;").await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!("IGDB unreachable: {e}"))),
        }
    }

    async fn shutdown(&self) -> Result<(), GamewishError> {
        Ok(())
    }
}

#[async_trait]
impl GameSearch for IgdbSearch {
    async fn find(&self, query: &str) -> Result<Vec<SearchResult>, GamewishError> {
        let games = self
            .client
            .query_games(&search_query(query, self.result_limit))
            .await?;
        debug!(query, hits = games.len(), "IGDB search");
        Ok(games.into_iter().map(SearchResult::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Game, GamewishError> {
        let game = self
            .client
            .query_games(&detail_query(id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| GamewishError::Search {
                message: format!("game {id} not found"),
                source: None,
            })?;
        Ok(Game::from(game))
    }
}
