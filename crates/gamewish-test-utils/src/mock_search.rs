// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock game catalog with canned results.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use gamewish_core::traits::adapter::PluginAdapter;
use gamewish_core::traits::search::GameSearch;
use gamewish_core::types::{AdapterType, Game, HealthStatus, SearchResult};
use gamewish_core::GamewishError;

/// A mock catalog for testing.
///
/// Unknown queries return no results. Unknown ids fail like the real
/// catalog does for a game it has never heard of.
pub struct MockSearch {
    results: Mutex<HashMap<String, Vec<SearchResult>>>,
    games: Mutex<HashMap<i64, Game>>,
    queries: Mutex<Vec<String>>,
}

impl MockSearch {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(HashMap::new()),
            games: Mutex::new(HashMap::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Register the results for an exact query string.
    pub async fn add_results(&self, query: &str, results: Vec<SearchResult>) {
        self.results.lock().await.insert(query.to_string(), results);
    }

    /// Register a game for `find_by_id`.
    pub async fn add_game(&self, game: Game) {
        self.games.lock().await.insert(game.id, game);
    }

    /// Every query passed to `find`, in order.
    pub async fn queries(&self) -> Vec<String> {
        self.queries.lock().await.clone()
    }
}

impl Default for MockSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockSearch {
    fn name(&self) -> &str {
        "mock-search"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Search
    }

    async fn health_check(&self) -> Result<HealthStatus, GamewishError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GamewishError> {
        Ok(())
    }
}

#[async_trait]
impl GameSearch for MockSearch {
    async fn find(&self, query: &str) -> Result<Vec<SearchResult>, GamewishError> {
        self.queries.lock().await.push(query.to_string());
        Ok(self
            .results
            .lock()
            .await
            .get(query)
            .cloned()
            .unwrap_or_default())
    }

    async fn find_by_id(&self, id: i64) -> Result<Game, GamewishError> {
        self.games
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| GamewishError::Search {
                message: format!("game {id} not found"),
                source: None,
            })
    }
}
