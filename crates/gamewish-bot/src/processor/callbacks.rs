// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Button press handling.

use chrono::{DateTime, Utc};
use gamewish_core::{EventMeta, Game, GameRecord, GamewishError};
use tracing::debug;

use super::{user_of, EventProcessor};
use crate::codec::CallbackData;
use crate::dates::{self, Resolution};
use crate::messages;

impl EventProcessor {
    pub(super) async fn handle_callback(
        &self,
        meta: &EventMeta,
        payload: &str,
        now: DateTime<Utc>,
    ) -> Result<(), GamewishError> {
        let data = CallbackData::decode(payload)?;
        debug!(user_name = meta.user_name.as_str(), action = %data.action(), "dispatching callback");

        match data {
            CallbackData::Select { game_id } => self.select_game(meta, game_id, now).await,
            CallbackData::Add {
                game_id,
                platform_ids,
            } => self.add_game(meta, game_id, &platform_ids).await,
            CallbackData::Remove { wishlist_id } => self.remove_entry(meta, wishlist_id).await,
            CallbackData::AddWithoutDate => self.add_pending_without_date(meta).await,
        }
    }

    async fn select_game(
        &self,
        meta: &EventMeta,
        game_id: i64,
        now: DateTime<Utc>,
    ) -> Result<(), GamewishError> {
        let game = self.search.find_by_id(game_id).await?;

        match dates::resolve(&game, now) {
            Resolution::Add(date) => {
                self.add_to_wishlist(meta, GameRecord::from(&game), date)
                    .await
            }
            Resolution::Choose(keyboard) => {
                self.transport
                    .send_with_keyboard(meta.chat_id, messages::MSG_CHOOSE_DATE, &keyboard)
                    .await
            }
        }
    }

    async fn add_game(
        &self,
        meta: &EventMeta,
        game_id: i64,
        platform_ids: &[i64],
    ) -> Result<(), GamewishError> {
        let game = self.search.find_by_id(game_id).await?;
        let date = chosen_date(&game, platform_ids)?;
        self.add_to_wishlist(meta, GameRecord::from(&game), date)
            .await
    }

    async fn remove_entry(&self, meta: &EventMeta, wishlist_id: i64) -> Result<(), GamewishError> {
        match self.storage.remove(wishlist_id, &user_of(meta)).await {
            Ok(()) => self.transport.send(meta.chat_id, messages::MSG_REMOVED).await,
            Err(e) if e.is_not_found() => {
                self.transport.send(meta.chat_id, messages::MSG_NOT_FOUND).await
            }
            Err(e) => Err(e),
        }
    }

    async fn add_pending_without_date(&self, meta: &EventMeta) -> Result<(), GamewishError> {
        match self.state.get(&meta.user_name) {
            Some(pending) => {
                let game = GameRecord::manual(&pending.pending_game_name);
                self.add_to_wishlist(meta, game, None).await
            }
            None => self.transport.send(meta.chat_id, messages::MSG_NO_PENDING).await,
        }
    }
}

/// Date of the first release on one of `platform_ids`. An empty list means no date.
fn chosen_date(
    game: &Game,
    platform_ids: &[i64],
) -> Result<Option<DateTime<Utc>>, GamewishError> {
    if platform_ids.is_empty() {
        return Ok(None);
    }
    game.release_dates
        .iter()
        .find(|d| platform_ids.contains(&d.platform.id))
        .map(|d| Some(d.date))
        .ok_or(GamewishError::PlatformNotFound { game_id: game.id })
}
