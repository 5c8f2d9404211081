// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Gamewish bot.
//!
//! This crate provides the collaborator traits, error type, and common
//! types shared by the bot engine and its adapters. The engine depends only
//! on the traits defined here, so transports, catalogs, and storage
//! backends can be swapped without touching it.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::GamewishError;
pub use types::{
    AdapterType, ChatId, Event, EventKind, EventMeta, Game, GameRecord, GameSource,
    HealthStatus, InlineKeyboard, KeyboardButton, Platform, PlatformDate, SearchResult, User,
    Wishlist,
};

pub use traits::{GameSearch, PluginAdapter, Transport, WishlistStorage};
