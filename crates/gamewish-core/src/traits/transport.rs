// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport trait for the chat platform the bot talks through.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::GamewishError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ChatId, Event, InlineKeyboard};

/// Pulls inbound events and delivers replies.
///
/// Implementations own any polling offset: an event returned by [`fetch`]
/// is never returned again.
///
/// [`fetch`]: Transport::fetch
#[async_trait]
pub trait Transport: PluginAdapter {
    /// Long-polls for up to `limit` events, waiting at most `timeout`.
    async fn fetch(&self, limit: u8, timeout: Duration) -> Result<Vec<Event>, GamewishError>;

    /// Sends a plain text message.
    async fn send(&self, chat_id: ChatId, text: &str) -> Result<(), GamewishError>;

    /// Sends a message with an inline keyboard attached.
    async fn send_with_keyboard(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: &InlineKeyboard,
    ) -> Result<(), GamewishError>;

    /// Acknowledges a button press so the client stops its spinner.
    async fn answer_callback(
        &self,
        callback_id: &str,
        text: &str,
        show_alert: bool,
    ) -> Result<(), GamewishError>;
}
