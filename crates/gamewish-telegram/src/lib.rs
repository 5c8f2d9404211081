// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram transport adapter for the Gamewish bot.
//!
//! Implements [`Transport`] for the Telegram Bot API via teloxide. Updates are
//! pulled with `getUpdates` long polling; the adapter tracks the offset so
//! each update is delivered once.

pub mod handler;

use std::future::Future;
use std::sync::atomic::{AtomicI32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use gamewish_config::model::TelegramConfig;
use gamewish_core::error::GamewishError;
use gamewish_core::traits::{PluginAdapter, Transport};
use gamewish_core::types::{AdapterType, ChatId, Event, HealthStatus, InlineKeyboard};
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use tracing::{debug, warn};

/// Extra time the HTTP client waits on top of the long-poll timeout.
const POLL_GRACE: Duration = Duration::from_secs(10);

/// Telegram transport implementing [`Transport`].
pub struct TelegramTransport {
    bot: Bot,
    config: TelegramConfig,
    /// Next `getUpdates` offset (last seen update id + 1).
    offset: AtomicI32,
}

impl TelegramTransport {
    /// Creates a new Telegram transport. Requires `config.bot_token`.
    pub fn new(config: TelegramConfig) -> Result<Self, GamewishError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            GamewishError::Config("telegram.bot_token is required for Telegram transport".into())
        })?;

        if token.is_empty() {
            return Err(GamewishError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        // The default client gives up before a long poll completes.
        let client = teloxide::net::default_reqwest_settings()
            .timeout(Duration::from_secs(config.poll_timeout_secs) + POLL_GRACE)
            .build()
            .map_err(|e| GamewishError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            bot: Bot::with_client(token, client),
            config,
            offset: AtomicI32::new(0),
        })
    }

    /// Returns a reference to the underlying teloxide Bot.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.config.send_timeout_secs)
    }

    /// Runs an outbound API call under the configured send timeout.
    async fn bounded<T, F>(&self, what: &str, call: F) -> Result<T, GamewishError>
    where
        F: Future<Output = Result<T, teloxide::RequestError>>,
    {
        let duration = self.send_timeout();
        match tokio::time::timeout(duration, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(GamewishError::Transport {
                message: format!("failed to {what}: {e}"),
                source: Some(Box::new(e)),
            }),
            Err(_) => Err(GamewishError::Timeout { duration }),
        }
    }
}

/// Converts a keyboard into Telegram's inline markup.
pub fn to_markup(keyboard: &InlineKeyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.text.clone(), b.callback_data.clone()))
            .collect::<Vec<_>>()
    }))
}

#[async_trait]
impl PluginAdapter for TelegramTransport {
    fn name(&self) -> &str {
        "telegram"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Transport
    }

    async fn health_check(&self) -> Result<HealthStatus, GamewishError> {
        match self.bot.get_me().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), GamewishError> {
        debug!("Telegram transport shutting down");
        Ok(())
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn fetch(&self, limit: u8, timeout: Duration) -> Result<Vec<Event>, GamewishError> {
        let offset = self.offset.load(Ordering::Acquire);
        let updates = self
            .bot
            .get_updates()
            .offset(offset)
            .limit(limit)
            .timeout(timeout.as_secs() as u32)
            .await
            .map_err(|e| GamewishError::Transport {
                message: format!("failed to fetch updates: {e}"),
                source: Some(Box::new(e)),
            })?;

        if let Some(last) = updates.last() {
            self.offset.store(last.id.0 as i32 + 1, Ordering::Release);
        }

        let events: Vec<Event> = updates
            .iter()
            .filter_map(|u| handler::to_event(u, &self.config.allowed_users))
            .collect();
        if events.len() < updates.len() {
            debug!(
                dropped = updates.len() - events.len(),
                "filtered updates from other chats or users"
            );
        }
        Ok(events)
    }

    async fn send(&self, chat_id: ChatId, text: &str) -> Result<(), GamewishError> {
        let request = self
            .bot
            .send_message(teloxide::types::ChatId(chat_id.0), text)
            .into_future();
        self.bounded("send message", request).await?;
        Ok(())
    }

    async fn send_with_keyboard(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: &InlineKeyboard,
    ) -> Result<(), GamewishError> {
        if keyboard.is_empty() {
            return self.send(chat_id, text).await;
        }
        let request = self
            .bot
            .send_message(teloxide::types::ChatId(chat_id.0), text)
            .reply_markup(to_markup(keyboard))
            .into_future();
        self.bounded("send keyboard", request).await?;
        Ok(())
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: &str,
        show_alert: bool,
    ) -> Result<(), GamewishError> {
        let mut request = self.bot.answer_callback_query(teloxide::types::CallbackQueryId(callback_id.to_owned()));
        if !text.is_empty() {
            request = request.text(text);
        }
        let result = self
            .bounded("answer callback", request.show_alert(show_alert).into_future())
            .await;
        if let Err(e) = &result {
            warn!(callback_id, error = %e, "callback acknowledgement failed");
        }
        result.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamewish_core::KeyboardButton;

    fn config(token: Option<&str>) -> TelegramConfig {
        TelegramConfig {
            bot_token: token.map(str::to_string),
            ..TelegramConfig::default()
        }
    }

    #[test]
    fn new_requires_bot_token() {
        assert!(TelegramTransport::new(config(None)).is_err());
    }

    #[test]
    fn new_rejects_empty_token() {
        assert!(TelegramTransport::new(config(Some(""))).is_err());
    }

    #[test]
    fn new_accepts_valid_token() {
        let transport =
            TelegramTransport::new(config(Some("123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11")))
                .unwrap();
        assert_eq!(transport.offset.load(Ordering::Acquire), 0);
    }

    #[test]
    fn plugin_adapter_metadata() {
        let transport = TelegramTransport::new(config(Some("test:token"))).unwrap();
        assert_eq!(transport.name(), "telegram");
        assert_eq!(transport.version(), semver::Version::new(0, 1, 0));
        assert_eq!(transport.adapter_type(), AdapterType::Transport);
    }

    #[test]
    fn markup_preserves_rows_and_payloads() {
        let keyboard = InlineKeyboard {
            rows: vec![
                vec![KeyboardButton::new("Hades", "select:1")],
                vec![
                    KeyboardButton::new("PC", "add:1:6"),
                    KeyboardButton::new("earlier", "add:1"),
                ],
            ],
        };
        let markup = to_markup(&keyboard);
        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(markup.inline_keyboard[1].len(), 2);
        assert_eq!(markup.inline_keyboard[0][0].text, "Hades");
    }
}
