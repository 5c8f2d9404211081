// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for the user, game and wishlist tables.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC text
//! (`2030-01-01T00:00:00Z`) so they order correctly as strings.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;

pub mod games;
pub mod users;
pub mod wishlist;

pub(crate) fn to_sql_time(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(crate) fn from_sql_time(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn from_sql_opt_time(
    idx: usize,
    raw: Option<String>,
) -> rusqlite::Result<Option<DateTime<Utc>>> {
    raw.map(|s| from_sql_time(idx, &s)).transpose()
}
