// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game catalog search trait.

use async_trait::async_trait;

use crate::error::GamewishError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Game, SearchResult};

/// Looks games up in an external catalog.
#[async_trait]
pub trait GameSearch: PluginAdapter {
    /// Free-text search. An empty result is not an error.
    async fn find(&self, query: &str) -> Result<Vec<SearchResult>, GamewishError>;

    /// Full detail, including per-platform release dates.
    async fn find_by_id(&self, id: i64) -> Result<Game, GamewishError>;
}
