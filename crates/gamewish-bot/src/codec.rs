// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inline button payloads.
//!
//! Wire form is `action:id[:extra]`. Telegram rejects a whole keyboard if one
//! `callback_data` exceeds [`MAX_PAYLOAD_LEN`] bytes, so builders of long
//! payloads must check [`CallbackData::fits`]. `add_without_date` is the only
//! action without an id.

use std::fmt;
use std::str::FromStr;

use gamewish_core::GamewishError;
use strum::{Display, EnumString};

/// Telegram's `callback_data` limit in bytes.
pub const MAX_PAYLOAD_LEN: usize = 64;

/// Action tag, the first field of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum CallbackAction {
    Select,
    Add,
    Remove,
    AddWithoutDate,
}

/// A decoded button payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackData {
    /// A search hit was picked: load its release dates.
    Select { game_id: i64 },
    /// Add a catalog game. An empty platform list means "no date".
    Add { game_id: i64, platform_ids: Vec<i64> },
    /// Drop one of the user's wishlist entries.
    Remove { wishlist_id: i64 },
    /// Add the pending manual game with no date.
    AddWithoutDate,
}

impl CallbackData {
    pub fn action(&self) -> CallbackAction {
        match self {
            CallbackData::Select { .. } => CallbackAction::Select,
            CallbackData::Add { .. } => CallbackAction::Add,
            CallbackData::Remove { .. } => CallbackAction::Remove,
            CallbackData::AddWithoutDate => CallbackAction::AddWithoutDate,
        }
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }

    pub fn decode(payload: &str) -> Result<Self, GamewishError> {
        payload.parse()
    }

    /// Whether the encoded payload is accepted by Telegram.
    pub fn fits(&self) -> bool {
        self.encode().len() <= MAX_PAYLOAD_LEN
    }
}

impl fmt::Display for CallbackData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = self.action();
        match self {
            CallbackData::Select { game_id } => write!(f, "{action}:{game_id}"),
            CallbackData::Add {
                game_id,
                platform_ids,
            } if platform_ids.is_empty() => write!(f, "{action}:{game_id}"),
            CallbackData::Add {
                game_id,
                platform_ids,
            } => {
                let ids: Vec<String> = platform_ids.iter().map(i64::to_string).collect();
                write!(f, "{action}:{game_id}:{}", ids.join(","))
            }
            CallbackData::Remove { wishlist_id } => write!(f, "{action}:{wishlist_id}"),
            CallbackData::AddWithoutDate => write!(f, "{action}"),
        }
    }
}

impl FromStr for CallbackData {
    type Err = GamewishError;

    fn from_str(payload: &str) -> Result<Self, Self::Err> {
        let malformed = || GamewishError::MalformedCallback(payload.to_string());

        let mut parts = payload.splitn(3, ':');
        let action = parts
            .next()
            .and_then(|a| CallbackAction::from_str(a).ok())
            .ok_or_else(malformed)?;

        if action == CallbackAction::AddWithoutDate {
            return match parts.next() {
                None => Ok(CallbackData::AddWithoutDate),
                Some(_) => Err(malformed()),
            };
        }

        let id: i64 = parts
            .next()
            .and_then(|id| id.parse().ok())
            .ok_or_else(malformed)?;
        let extra = parts.next();

        match (action, extra) {
            (CallbackAction::Select, None) => Ok(CallbackData::Select { game_id: id }),
            (CallbackAction::Remove, None) => Ok(CallbackData::Remove { wishlist_id: id }),
            (CallbackAction::Add, None) => Ok(CallbackData::Add {
                game_id: id,
                platform_ids: Vec::new(),
            }),
            (CallbackAction::Add, Some(list)) => {
                let platform_ids = list
                    .split(',')
                    .filter(|s| !s.is_empty())
                    .map(|s| s.parse::<i64>().map_err(|_| malformed()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(CallbackData::Add {
                    game_id: id,
                    platform_ids,
                })
            }
            _ => Err(malformed()),
        }
    }
}
