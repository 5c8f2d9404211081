// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Update filtering and conversion.
//!
//! Decides whether a Telegram update should reach the bot at all (private
//! chats, allowed senders) and turns it into a transport-neutral [`Event`].

use gamewish_core::{Event, EventKind, EventMeta};
use teloxide::types::{CallbackQuery, ChatKind, Message, Update, UpdateKind, User};
use tracing::debug;

/// Checks whether a sender may use the bot.
///
/// An empty `allowed_users` list admits everyone. Otherwise the sender's
/// numeric id or username (case-insensitive, optional `@`) must be listed.
pub fn is_authorized(user: &User, allowed_users: &[String]) -> bool {
    if allowed_users.is_empty() {
        return true;
    }

    let user_id = user.id.0.to_string();
    allowed_users.iter().any(|allowed| {
        if *allowed == user_id {
            return true;
        }
        let allowed = allowed.strip_prefix('@').unwrap_or(allowed);
        user.username
            .as_deref()
            .is_some_and(|name| name.eq_ignore_ascii_case(allowed))
    })
}

/// Checks whether the message is from a private (DM) chat.
pub fn is_dm(msg: &Message) -> bool {
    matches!(msg.chat.kind, ChatKind::Private(_))
}

/// Stable user key: the username, or the numeric id for users without one.
pub fn user_name(user: &User) -> String {
    user.username
        .clone()
        .unwrap_or_else(|| user.id.0.to_string())
}

/// Converts an update into an [`Event`].
///
/// Returns `None` for updates that must be dropped silently (group chats,
/// unauthorized senders). Updates the bot cannot interpret become
/// [`EventKind::Unknown`] so the processor can report them.
pub fn to_event(update: &Update, allowed_users: &[String]) -> Option<Event> {
    let id = update.id.0.to_string();
    match &update.kind {
        UpdateKind::Message(msg) => from_message(id, msg, allowed_users),
        UpdateKind::CallbackQuery(query) => from_callback(query, allowed_users),
        _ => Some(unknown(id)),
    }
}

fn from_message(id: String, msg: &Message, allowed_users: &[String]) -> Option<Event> {
    if !is_dm(msg) {
        debug!(chat_id = msg.chat.id.0, "ignoring non-DM message");
        return None;
    }
    let Some(from) = msg.from.as_ref() else {
        return Some(unknown(id));
    };
    if !is_authorized(from, allowed_users) {
        debug!(chat_id = msg.chat.id.0, "ignoring unauthorized user");
        return None;
    }
    let Some(text) = msg.text() else {
        debug!(msg_id = msg.id.0, "unsupported message type");
        return Some(unknown(id));
    };

    Some(Event {
        id,
        kind: EventKind::Message(EventMeta {
            chat_id: gamewish_core::ChatId(msg.chat.id.0),
            user_name: user_name(from),
        }),
        text: text.to_string(),
    })
}

fn from_callback(query: &CallbackQuery, allowed_users: &[String]) -> Option<Event> {
    if !is_authorized(&query.from, allowed_users) {
        debug!(user_id = query.from.id.0, "ignoring unauthorized callback");
        return None;
    }
    // A press without data still needs an answer, so it stays a callback and
    // fails payload decoding downstream.
    let data = query.data.clone().unwrap_or_default();

    // Buttons are only sent to private chats, where the chat id is the user id.
    Some(Event {
        id: query.id.to_string(),
        kind: EventKind::Callback(EventMeta {
            chat_id: gamewish_core::ChatId(query.from.id.0 as i64),
            user_name: user_name(&query.from),
        }),
        text: data,
    })
}

fn unknown(id: String) -> Event {
    Event {
        id,
        kind: EventKind::Unknown,
        text: String::new(),
    }
}
