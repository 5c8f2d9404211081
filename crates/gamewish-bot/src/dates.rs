// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Release date resolution.
//!
//! Given one game's per-platform release dates, decides whether it can be
//! added straight away or whether the user has to pick a date. Platforms are
//! grouped by UTC calendar day, not by exact timestamp.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use gamewish_core::{Game, InlineKeyboard, KeyboardButton, Platform, PlatformDate};

use crate::codec::CallbackData;

/// User-facing date format, both for input and for labels.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Outcome of [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Add without asking, with this expected date (or none).
    Add(Option<DateTime<Utc>>),
    /// Ask the user to pick one of the offered dates.
    Choose(InlineKeyboard),
}

/// True when every date is at or before `now`. Vacuously true for no dates.
pub fn is_past_dates(dates: &[PlatformDate], now: DateTime<Utc>) -> bool {
    dates.iter().all(|d| d.date <= now)
}

/// True when all dates are identical, or there is at most one.
pub fn is_same_date_platform(dates: &[PlatformDate]) -> bool {
    dates.windows(2).all(|pair| pair[0].date == pair[1].date)
}

/// Platforms per UTC day, in day order. A platform listed twice on one day appears once.
pub fn group_by_day(dates: &[PlatformDate]) -> BTreeMap<NaiveDate, Vec<Platform>> {
    let mut groups: BTreeMap<NaiveDate, Vec<Platform>> = BTreeMap::new();
    for d in dates {
        let platforms = groups.entry(d.date.date_naive()).or_default();
        if !platforms.iter().any(|p| p.id == d.platform.id) {
            platforms.push(d.platform.clone());
        }
    }
    groups
}

fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(chrono::NaiveTime::MIN).and_utc()
}

fn joined_names<'a>(platforms: impl IntoIterator<Item = &'a Platform>) -> String {
    platforms
        .into_iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(" | ")
}

/// `add` payload for one day's platforms, keeping the longest prefix of ids
/// that fits. All ids in a group share the day, so any of them picks it.
fn add_payload(game_id: i64, platform_ids: &[i64]) -> CallbackData {
    let mut kept = platform_ids.len();
    loop {
        let data = CallbackData::Add {
            game_id,
            platform_ids: platform_ids[..kept].to_vec(),
        };
        if kept <= 1 || data.fits() {
            return data;
        }
        kept -= 1;
    }
}

/// Decides how a catalog game gets its expected release date.
pub fn resolve(game: &Game, now: DateTime<Utc>) -> Resolution {
    let dates = &game.release_dates;

    if is_past_dates(dates, now) {
        return Resolution::Add(None);
    }

    if is_same_date_platform(dates) {
        let shared = dates.first().map(|d| d.date).filter(|date| *date > now);
        return Resolution::Add(shared);
    }

    Resolution::Choose(date_keyboard(game.id, dates, now))
}

/// One button per future day, then a trailing "(earlier)" button for
/// platforms whose day has already started.
pub fn date_keyboard(game_id: i64, dates: &[PlatformDate], now: DateTime<Utc>) -> InlineKeyboard {
    let (past, future): (Vec<_>, Vec<_>) = group_by_day(dates)
        .into_iter()
        .partition(|(day, _)| day_start(*day) <= now);

    let mut buttons: Vec<KeyboardButton> = future
        .iter()
        .map(|(day, platforms)| {
            let label = format!(
                "{} 📅 {}",
                joined_names(platforms),
                day.format(DATE_FORMAT)
            );
            let ids: Vec<i64> = platforms.iter().map(|p| p.id).collect();
            KeyboardButton::new(label, add_payload(game_id, &ids).encode())
        })
        .collect();

    if !past.is_empty() {
        let label = format!(
            "{} (earlier)",
            joined_names(past.iter().flat_map(|(_, platforms)| platforms))
        );
        let data = CallbackData::Add {
            game_id,
            platform_ids: Vec::new(),
        };
        buttons.push(KeyboardButton::new(label, data.encode()));
    }

    InlineKeyboard::single_column(buttons)
}

/// Parses a `DD.MM.YYYY` reply as midnight UTC.
pub fn parse_user_date(text: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .ok()
        .map(day_start)
}

/// Whether a typed date lies before today. Today itself still counts as upcoming.
pub fn is_before_today(date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    date.date_naive() < now.date_naive()
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}
