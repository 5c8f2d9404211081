// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the collaborator traits and the bot engine.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifier of the chat a message arrived from and replies go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the role an adapter plays.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Transport,
    Search,
    Storage,
}

// --- Inbound events ---

/// Sender details attached to messages and callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMeta {
    pub chat_id: ChatId,
    pub user_name: String,
}

/// What kind of update the transport delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// A plain text message (commands included).
    Message(EventMeta),
    /// A button press; `Event::text` holds the callback payload.
    Callback(EventMeta),
    /// Anything the bot does not handle (edits, stickers, channel posts).
    Unknown,
}

/// A single inbound update, consumed once by the event processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Transport-specific id. For callbacks this is the id to acknowledge.
    pub id: String,
    pub kind: EventKind,
    pub text: String,
}

impl Event {
    /// Builds a text message event.
    pub fn message(id: impl Into<String>, chat_id: i64, user_name: &str, text: &str) -> Self {
        Self {
            id: id.into(),
            kind: EventKind::Message(EventMeta {
                chat_id: ChatId(chat_id),
                user_name: user_name.to_string(),
            }),
            text: text.to_string(),
        }
    }

    /// Builds a callback event carrying `payload`.
    pub fn callback(id: impl Into<String>, chat_id: i64, user_name: &str, payload: &str) -> Self {
        Self {
            id: id.into(),
            kind: EventKind::Callback(EventMeta {
                chat_id: ChatId(chat_id),
                user_name: user_name.to_string(),
            }),
            text: payload.to_string(),
        }
    }

    /// Returns the sender details, if the event has any.
    pub fn meta(&self) -> Option<&EventMeta> {
        match &self.kind {
            EventKind::Message(meta) | EventKind::Callback(meta) => Some(meta),
            EventKind::Unknown => None,
        }
    }
}

// --- Outbound keyboards ---

/// A single inline button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardButton {
    pub text: String,
    pub callback_data: String,
}

impl KeyboardButton {
    pub fn new(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }
}

/// Rows of inline buttons attached to an outbound message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<KeyboardButton>>,
}

impl InlineKeyboard {
    /// One button per row, in order.
    pub fn single_column(buttons: impl IntoIterator<Item = KeyboardButton>) -> Self {
        Self {
            rows: buttons.into_iter().map(|b| vec![b]).collect(),
        }
    }

    /// Iterates over every button, row by row.
    pub fn buttons(&self) -> impl Iterator<Item = &KeyboardButton> {
        self.rows.iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }
}

// --- Game catalog ---

/// Where a game record came from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GameSource {
    Steam,
    Igdb,
    Rawg,
    Manual,
}

/// A gaming platform as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    pub id: i64,
    pub name: String,
}

/// Release date of a game on one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformDate {
    pub platform: Platform,
    pub date: DateTime<Utc>,
}

/// One hit from a catalog search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    pub name: String,
    pub first_release_date: Option<DateTime<Utc>>,
}

/// Full catalog detail for a single game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub release_dates: Vec<PlatformDate>,
    pub source: GameSource,
}

// --- Persistent records ---

/// A wishlist owner. Created lazily on the first wishlist write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Database id, `0` until persisted.
    pub id: i64,
    pub name: String,
    pub chat_id: ChatId,
}

/// A game as stored alongside wishlist entries.
///
/// Identity is `(name, source, external_url)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Database id, `0` until persisted.
    pub id: i64,
    pub name: String,
    pub source: GameSource,
    pub external_url: Option<String>,
}

impl GameRecord {
    /// A game typed in by the user, with no catalog link.
    pub fn manual(name: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            source: GameSource::Manual,
            external_url: None,
        }
    }
}

impl From<&Game> for GameRecord {
    fn from(game: &Game) -> Self {
        Self {
            id: 0,
            name: game.name.clone(),
            source: game.source,
            external_url: (!game.url.is_empty()).then(|| game.url.clone()),
        }
    }
}

/// A (user, game) pairing with an optional expected release date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wishlist {
    /// Database id, `0` until persisted.
    pub id: i64,
    pub user: User,
    pub game: GameRecord,
    pub expected_release_date: Option<DateTime<Utc>>,
    pub added_at: Option<DateTime<Utc>>,
    /// Set once by the notification scheduler and never cleared.
    pub notified_at: Option<DateTime<Utc>>,
}

impl Wishlist {
    /// A new, not yet persisted entry.
    pub fn new(user: User, game: GameRecord, expected_release_date: Option<DateTime<Utc>>) -> Self {
        Self {
            id: 0,
            user,
            game,
            expected_release_date,
            added_at: None,
            notified_at: None,
        }
    }
}
