// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event dispatch.
//!
//! The [`EventProcessor`] turns one inbound [`Event`] into a state transition:
//! a command reply, a search keyboard, a wishlist mutation, or a date prompt.
//! Text messages go through [`commands`], button presses through [`callbacks`].

pub mod callbacks;
pub mod commands;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use gamewish_core::{
    Event, EventKind, EventMeta, GameRecord, GameSearch, GamewishError, Transport, User,
    Wishlist, WishlistStorage,
};
use tracing::{debug, info, warn};

use crate::messages;
use crate::state::ConversationStore;

pub use commands::Command;

/// Routes events to command and callback handlers.
///
/// Collaborators are shared trait objects so the consumer and the
/// notification scheduler can hold the same storage and transport.
pub struct EventProcessor {
    storage: Arc<dyn WishlistStorage>,
    search: Arc<dyn GameSearch>,
    transport: Arc<dyn Transport>,
    state: Arc<ConversationStore>,
}

impl EventProcessor {
    /// Creates a processor with an empty conversation store.
    pub fn new(
        storage: Arc<dyn WishlistStorage>,
        search: Arc<dyn GameSearch>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self::with_state(storage, search, transport, Arc::new(ConversationStore::new()))
    }

    /// Creates a processor that shares an existing conversation store.
    pub fn with_state(
        storage: Arc<dyn WishlistStorage>,
        search: Arc<dyn GameSearch>,
        transport: Arc<dyn Transport>,
        state: Arc<ConversationStore>,
    ) -> Self {
        Self {
            storage,
            search,
            transport,
            state,
        }
    }

    /// The per-user pending-action store.
    pub fn state(&self) -> &ConversationStore {
        &self.state
    }

    /// Processes one event against the current time.
    pub async fn process(&self, event: Event) -> Result<(), GamewishError> {
        self.process_at(event, Utc::now()).await
    }

    /// Processes one event as if it arrived at `now`.
    pub async fn process_at(&self, event: Event, now: DateTime<Utc>) -> Result<(), GamewishError> {
        match &event.kind {
            EventKind::Message(meta) => {
                validate_meta(meta)?;
                debug!(
                    event_id = event.id.as_str(),
                    chat_id = %meta.chat_id,
                    user_name = meta.user_name.as_str(),
                    "processing message"
                );
                self.handle_message(meta, &event.text, now).await
            }
            EventKind::Callback(meta) => {
                debug!(
                    event_id = event.id.as_str(),
                    chat_id = %meta.chat_id,
                    user_name = meta.user_name.as_str(),
                    payload = event.text.as_str(),
                    "processing callback"
                );
                let result = match validate_meta(meta) {
                    Ok(()) => self.handle_callback(meta, &event.text, now).await,
                    Err(e) => Err(e),
                };
                // The client keeps spinning until the press is answered, so
                // acknowledge regardless of the outcome.
                if let Err(e) = self.transport.answer_callback(&event.id, "", false).await {
                    warn!(event_id = event.id.as_str(), error = %e, "failed to answer callback");
                }
                result
            }
            EventKind::Unknown => Err(GamewishError::UnknownEventType),
        }
    }

    /// Shared add path for catalog and manual games.
    ///
    /// Rejects duplicates without writing. On success the user's pending
    /// state is cleared.
    async fn add_to_wishlist(
        &self,
        meta: &EventMeta,
        game: GameRecord,
        expected_release_date: Option<DateTime<Utc>>,
    ) -> Result<(), GamewishError> {
        let wishlist = Wishlist::new(user_of(meta), game, expected_release_date);

        if self.storage.is_exists(&wishlist).await? {
            debug!(
                user_name = meta.user_name.as_str(),
                game = wishlist.game.name.as_str(),
                "game already on wishlist"
            );
            return self
                .transport
                .send(meta.chat_id, messages::MSG_ALREADY_EXISTS)
                .await;
        }

        let id = self.storage.add(&wishlist).await?;
        self.state.clear(&meta.user_name);
        info!(
            wishlist_id = id,
            user_name = meta.user_name.as_str(),
            game = wishlist.game.name.as_str(),
            dated = expected_release_date.is_some(),
            "wishlist entry added"
        );

        self.transport.send(meta.chat_id, messages::MSG_SAVED).await
    }

    /// The user's entries, or none if they never added anything.
    async fn entries_of(&self, meta: &EventMeta) -> Result<Vec<Wishlist>, GamewishError> {
        match self.storage.get_user_by_name(&meta.user_name).await {
            Ok(user) => self.storage.get_all(&user).await,
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}

fn validate_meta(meta: &EventMeta) -> Result<(), GamewishError> {
    if meta.user_name.is_empty() || meta.chat_id.0 == 0 {
        return Err(GamewishError::UnknownMetaType);
    }
    Ok(())
}

fn user_of(meta: &EventMeta) -> User {
    User {
        id: 0,
        name: meta.user_name.clone(),
        chat_id: meta.chat_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamewish_core::ChatId;

    #[test]
    fn meta_validation() {
        let good = EventMeta {
            chat_id: ChatId(7),
            user_name: "alice".into(),
        };
        assert!(validate_meta(&good).is_ok());

        let no_name = EventMeta {
            user_name: String::new(),
            ..good.clone()
        };
        assert!(matches!(
            validate_meta(&no_name),
            Err(GamewishError::UnknownMetaType)
        ));

        let no_chat = EventMeta {
            chat_id: ChatId(0),
            ..good
        };
        assert!(matches!(
            validate_meta(&no_chat),
            Err(GamewishError::UnknownMetaType)
        ));
    }

    #[test]
    fn user_from_meta_is_unsaved() {
        let meta = EventMeta {
            chat_id: ChatId(7),
            user_name: "alice".into(),
        };
        let user = user_of(&meta);
        assert_eq!(user.id, 0);
        assert_eq!(user.name, "alice");
        assert_eq!(user.chat_id, ChatId(7));
    }
}
