// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the IGDB v4 `games` endpoint.
//!
//! IGDB only returns the fields a query asks for, so everything beyond `id`
//! is optional. Dates are Unix seconds.

use chrono::{DateTime, Utc};
use gamewish_core::{Game, GameSource, Platform, PlatformDate, SearchResult};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiGame {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub first_release_date: Option<i64>,
    #[serde(default)]
    pub release_dates: Vec<ApiReleaseDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiReleaseDate {
    /// Missing for "TBD" releases.
    #[serde(default)]
    pub date: Option<i64>,
    #[serde(default)]
    pub platform: Option<ApiPlatform>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPlatform {
    pub id: i64,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One entry of IGDB's error array.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub cause: Option<String>,
}

fn from_unix(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

impl From<ApiGame> for SearchResult {
    fn from(game: ApiGame) -> Self {
        Self {
            id: game.id,
            name: game.name,
            first_release_date: game.first_release_date.and_then(from_unix),
        }
    }
}

impl ApiPlatform {
    /// Short label shown on buttons.
    fn label(&self) -> String {
        self.abbreviation
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| format!("#{}", self.id))
    }
}

impl From<ApiGame> for Game {
    fn from(game: ApiGame) -> Self {
        let release_dates = game
            .release_dates
            .into_iter()
            .filter_map(|rd| {
                let platform = rd.platform?;
                let date = rd.date.and_then(from_unix)?;
                Some(PlatformDate {
                    platform: Platform {
                        id: platform.id,
                        name: platform.label(),
                    },
                    date,
                })
            })
            .collect();

        Self {
            id: game.id,
            name: game.name,
            url: game.url.unwrap_or_default(),
            release_dates,
            source: GameSource::Igdb,
        }
    }
}
