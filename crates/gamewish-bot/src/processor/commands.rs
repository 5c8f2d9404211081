// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text message handling: the manual-date step, commands, and search.

use chrono::{DateTime, Utc};
use gamewish_core::{EventMeta, GameRecord, GamewishError, InlineKeyboard, KeyboardButton};
use tracing::debug;

use super::EventProcessor;
use crate::codec::CallbackData;
use crate::dates;
use crate::messages;
use crate::state::{ConversationState, Step};

/// A routed text message. Matching is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Help,
    Start,
    List,
    Remove,
    /// Anything else is a catalog query.
    Search(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(text: &'a str) -> Self {
        match text {
            "/help" => Command::Help,
            "/start" => Command::Start,
            "/list" => Command::List,
            "/remove" => Command::Remove,
            other => Command::Search(other),
        }
    }
}

impl EventProcessor {
    pub(super) async fn handle_message(
        &self,
        meta: &EventMeta,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<(), GamewishError> {
        if let Some(pending) = self.state.get(&meta.user_name) {
            match pending.step {
                Step::AwaitingDate => match dates::parse_user_date(text) {
                    Some(date) if dates::is_before_today(date, now) => {
                        return self
                            .transport
                            .send(meta.chat_id, messages::MSG_DATE_IN_PAST)
                            .await;
                    }
                    Some(date) => {
                        let game = GameRecord::manual(&pending.pending_game_name);
                        return self.add_to_wishlist(meta, game, Some(date)).await;
                    }
                    None => {
                        debug!(
                            user_name = meta.user_name.as_str(),
                            "reply is not a date, dropping pending state"
                        );
                        self.state.clear(&meta.user_name);
                    }
                },
            }
        }

        self.route_command(meta, text).await
    }

    async fn route_command(&self, meta: &EventMeta, text: &str) -> Result<(), GamewishError> {
        let command = Command::parse(text);
        debug!(user_name = meta.user_name.as_str(), ?command, "routing command");

        match command {
            Command::Help => self.transport.send(meta.chat_id, messages::MSG_HELP).await,
            Command::Start => {
                let text = format!("{}\n\n{}", messages::MSG_HELLO, messages::MSG_HELP);
                self.transport.send(meta.chat_id, &text).await
            }
            Command::List => self.send_list(meta).await,
            Command::Remove => self.send_remove_menu(meta).await,
            Command::Search(query) => self.search_game(meta, query).await,
        }
    }

    async fn search_game(&self, meta: &EventMeta, query: &str) -> Result<(), GamewishError> {
        let query = query.trim();
        if query.is_empty() {
            return self.transport.send(meta.chat_id, messages::MSG_HELP).await;
        }

        let results = self.search.find(query).await?;
        debug!(query, hits = results.len(), "catalog search finished");

        if results.is_empty() {
            self.state
                .set(&meta.user_name, ConversationState::awaiting_date(query));
            let keyboard = InlineKeyboard::single_column([KeyboardButton::new(
                messages::BUTTON_ADD_WITHOUT_DATE,
                CallbackData::AddWithoutDate.encode(),
            )]);
            return self
                .transport
                .send_with_keyboard(meta.chat_id, &messages::no_results(query), &keyboard)
                .await;
        }

        let keyboard = InlineKeyboard::single_column(results.iter().map(|result| {
            KeyboardButton::new(
                messages::search_label(result),
                CallbackData::Select { game_id: result.id }.encode(),
            )
        }));
        self.transport
            .send_with_keyboard(meta.chat_id, messages::MSG_CHOOSE_GAME, &keyboard)
            .await
    }

    async fn send_list(&self, meta: &EventMeta) -> Result<(), GamewishError> {
        let entries = self.entries_of(meta).await?;
        if entries.is_empty() {
            return self.transport.send(meta.chat_id, messages::MSG_EMPTY_LIST).await;
        }
        self.transport
            .send(meta.chat_id, &messages::wishlist_digest(&entries))
            .await
    }

    async fn send_remove_menu(&self, meta: &EventMeta) -> Result<(), GamewishError> {
        let entries = self.entries_of(meta).await?;
        if entries.is_empty() {
            return self.transport.send(meta.chat_id, messages::MSG_EMPTY_LIST).await;
        }
        let keyboard = InlineKeyboard::single_column(entries.iter().map(|entry| {
            KeyboardButton::new(
                messages::remove_label(entry),
                CallbackData::Remove {
                    wishlist_id: entry.id,
                }
                .encode(),
            )
        }));
        self.transport
            .send_with_keyboard(meta.chat_id, messages::MSG_CHOOSE_REMOVE, &keyboard)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_match_exactly() {
        assert_eq!(Command::parse("/help"), Command::Help);
        assert_eq!(Command::parse("/start"), Command::Start);
        assert_eq!(Command::parse("/list"), Command::List);
        assert_eq!(Command::parse("/remove"), Command::Remove);
    }

    #[test]
    fn anything_else_is_a_search() {
        assert_eq!(Command::parse("/LIST"), Command::Search("/LIST"));
        assert_eq!(Command::parse("/list "), Command::Search("/list "));
        assert_eq!(Command::parse("Halo"), Command::Search("Halo"));
    }
}
