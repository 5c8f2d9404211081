// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Gamewish bot.

use thiserror::Error;

/// The primary error type used across all Gamewish collaborator traits and core operations.
#[derive(Debug, Error)]
pub enum GamewishError {
    /// Configuration errors (missing token, invalid header values, bad paths).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, row decoding).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Chat transport errors (polling failure, send failure, rate limiting).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Game catalog errors (HTTP failure, unexpected payload, unknown game).
    #[error("search error: {message}")]
    Search {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The inbound event is neither a message nor a callback.
    #[error("unknown event type")]
    UnknownEventType,

    /// The inbound event carries no usable chat id or user name.
    #[error("unknown meta type")]
    UnknownMetaType,

    /// A button payload that does not follow `action:id[:args]`.
    #[error("malformed callback payload `{0}`")]
    MalformedCallback(String),

    /// None of the requested platforms has a release date for the game.
    #[error("platform not found for game {game_id}")]
    PlatformNotFound { game_id: i64 },

    /// The user has never written to their wishlist.
    #[error("user doesn't exist")]
    NoUser,

    /// The wishlist entry does not exist (or belongs to someone else).
    #[error("no wishlist")]
    NoWishlist,

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GamewishError {
    /// Returns `true` for the not-found variants that are rendered as an
    /// empty state instead of being reported.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GamewishError::NoUser | GamewishError::NoWishlist)
    }
}
