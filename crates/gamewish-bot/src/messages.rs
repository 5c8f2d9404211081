// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing texts and digest formatting.

use std::fmt::Write;

use chrono::Datelike;
use gamewish_core::{GameRecord, SearchResult, Wishlist};

use crate::dates::format_date;

pub const MSG_HELP: &str = "Send me the name of a game and I'll look it up.\n\n\
Pick a result to put it on your wishlist. When it comes out, I'll let you know.\n\n\
/list shows your wishlist\n\
/remove takes a game off it\n\
/help shows this message";

pub const MSG_HELLO: &str = "Hi! 👾 I keep track of the games you're waiting for.";

pub const MSG_SAVED: &str = "Saved! 👌";
pub const MSG_ALREADY_EXISTS: &str = "It's already in your list 😉";
pub const MSG_REMOVED: &str = "Removed from your list 🗑";
pub const MSG_NOT_FOUND: &str = "Couldn't find that entry in your list 🤷";
pub const MSG_EMPTY_LIST: &str = "Nothing on your list yet 🙊";
pub const MSG_DATE_IN_PAST: &str = "That date is in the past. Send a date like 01.01.2030.";
pub const MSG_CHOOSE_GAME: &str = "Here's what I found:";
pub const MSG_CHOOSE_DATE: &str = "Release dates differ between platforms. Which one should I remind you about?";
pub const MSG_CHOOSE_REMOVE: &str = "Which game should I remove?";
pub const MSG_NO_PENDING: &str = "Nothing to add. Send me a game name first.";
pub const MSG_LIST_HEADER: &str = "🎮 Your wishlist:";
pub const MSG_RELEASING_TODAY: &str = "📢 Releasing today:";
pub const BUTTON_ADD_WITHOUT_DATE: &str = "Add without a date";

/// Prompt shown when a search comes back empty.
pub fn no_results(query: &str) -> String {
    format!(
        "I couldn't find \"{query}\". Reply with its release date as DD.MM.YYYY, \
or add it without a date."
    )
}

/// Search result button label: name plus release year when known.
pub fn search_label(result: &SearchResult) -> String {
    match result.first_release_date {
        Some(date) => format!("{} ({})", result.name, date.year()),
        None => result.name.clone(),
    }
}

/// `/list` digest: header, then one block per entry.
pub fn wishlist_digest(entries: &[Wishlist]) -> String {
    let mut out = String::from(MSG_LIST_HEADER);
    for entry in entries {
        let _ = write!(out, "\n\n▫️ {}", entry.game.name);
        if let Some(date) = entry.expected_release_date {
            let _ = write!(out, "\n📅 {}", format_date(date));
        }
        push_link(&mut out, &entry.game);
    }
    out
}

/// `/remove` button label.
pub fn remove_label(entry: &Wishlist) -> String {
    match entry.expected_release_date {
        Some(date) => format!("{} 📅 {}", entry.game.name, format_date(date)),
        None => entry.game.name.clone(),
    }
}

/// Release-day digest sent by the notification scheduler.
pub fn release_digest<'a>(games: impl IntoIterator<Item = &'a GameRecord>) -> String {
    let mut out = String::from(MSG_RELEASING_TODAY);
    for game in games {
        let _ = write!(out, "\n\n🔥 {}", game.name);
        push_link(&mut out, game);
    }
    out
}

fn push_link(out: &mut String, game: &GameRecord) {
    if let Some(url) = game.external_url.as_deref().filter(|u| !u.is_empty()) {
        let _ = write!(out, "\n🌐 {url}");
    }
}
