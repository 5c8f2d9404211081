// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage trait for wishlist persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::GamewishError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{User, Wishlist};

/// Adapter for wishlist persistence backends.
///
/// Users and games are upserted implicitly by [`add`]; callers only
/// ever deal in wishlist entries.
///
/// [`add`]: WishlistStorage::add
#[async_trait]
pub trait WishlistStorage: PluginAdapter {
    /// Initializes the backend (opens the connection, runs migrations).
    async fn initialize(&self) -> Result<(), GamewishError>;

    /// Closes the backend, flushing pending writes.
    async fn close(&self) -> Result<(), GamewishError>;

    /// Inserts an entry, creating the user and game on first sight.
    /// Returns the new wishlist id.
    async fn add(&self, wishlist: &Wishlist) -> Result<i64, GamewishError>;

    /// Whether the user already tracks this game.
    async fn is_exists(&self, wishlist: &Wishlist) -> Result<bool, GamewishError>;

    /// Fails with [`GamewishError::NoUser`] if the user never added anything.
    async fn get_user_by_name(&self, name: &str) -> Result<User, GamewishError>;

    /// All entries for the user, ordered by game name.
    async fn get_all(&self, user: &User) -> Result<Vec<Wishlist>, GamewishError>;

    /// Deletes one entry owned by `user`.
    /// Fails with [`GamewishError::NoWishlist`] when nothing matched.
    async fn remove(&self, wishlist_id: i64, user: &User) -> Result<(), GamewishError>;

    /// Unnotified entries whose expected release date is at or before `now`.
    /// Entries without a date are never returned.
    async fn get_to_notify(&self, now: DateTime<Utc>) -> Result<Vec<Wishlist>, GamewishError>;

    /// Marks an entry as notified at `at`.
    async fn notify(&self, wishlist: &Wishlist, at: DateTime<Utc>) -> Result<(), GamewishError>;
}
