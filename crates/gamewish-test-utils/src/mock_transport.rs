// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat transport for deterministic testing.
//!
//! `MockTransport` implements `Transport` with injectable fetch batches and
//! captured outbound messages for assertion in tests.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use gamewish_core::traits::adapter::PluginAdapter;
use gamewish_core::traits::transport::Transport;
use gamewish_core::types::{AdapterType, ChatId, Event, HealthStatus, InlineKeyboard};
use gamewish_core::GamewishError;

/// Upper bound on how long an empty fetch pretends to long-poll.
const EMPTY_POLL: Duration = Duration::from_millis(10);

/// A message captured by `send` or `send_with_keyboard`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub chat_id: ChatId,
    pub text: String,
    pub keyboard: Option<InlineKeyboard>,
}

/// A captured `answer_callback` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackAnswer {
    pub callback_id: String,
    pub text: String,
    pub show_alert: bool,
}

/// A mock transport for testing.
///
/// Fetches pop injected batches (or injected failures) in order. An empty
/// queue yields an empty batch after a short pause.
pub struct MockTransport {
    batches: Mutex<VecDeque<Result<Vec<Event>, String>>>,
    sent: Mutex<Vec<SentMessage>>,
    answers: Mutex<Vec<CallbackAnswer>>,
    failing_chats: Mutex<HashSet<ChatId>>,
    failing_answers: AtomicBool,
    fetch_calls: AtomicUsize,
}

impl MockTransport {
    /// Create a new mock transport with empty queues.
    pub fn new() -> Self {
        Self {
            batches: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
            answers: Mutex::new(Vec::new()),
            failing_chats: Mutex::new(HashSet::new()),
            failing_answers: AtomicBool::new(false),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    /// Queue a batch for a later `fetch`.
    pub async fn push_batch(&self, events: Vec<Event>) {
        self.batches.lock().await.push_back(Ok(events));
    }

    /// Queue a fetch failure.
    pub async fn push_fetch_error(&self, message: &str) {
        self.batches.lock().await.push_back(Err(message.to_string()));
    }

    /// Make every `answer_callback` fail. Failed answers are not recorded.
    pub fn fail_answers(&self, fail: bool) {
        self.failing_answers.store(fail, Ordering::Relaxed);
    }

    /// Make every send to `chat_id` fail until [`recover`](Self::recover) is called.
    pub async fn fail_sends_to(&self, chat_id: ChatId) {
        self.failing_chats.lock().await.insert(chat_id);
    }

    pub async fn recover(&self, chat_id: ChatId) {
        self.failing_chats.lock().await.remove(&chat_id);
    }

    /// Get all successfully sent messages.
    pub async fn sent_messages(&self) -> Vec<SentMessage> {
        self.sent.lock().await.clone()
    }

    /// Messages sent to one chat.
    pub async fn sent_to(&self, chat_id: ChatId) -> Vec<SentMessage> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect()
    }

    pub async fn last_sent(&self) -> Option<SentMessage> {
        self.sent.lock().await.last().cloned()
    }

    /// Clear all sent messages.
    pub async fn clear_sent(&self) {
        self.sent.lock().await.clear();
    }

    /// Get all callback acknowledgements.
    pub async fn answers(&self) -> Vec<CallbackAnswer> {
        self.answers.lock().await.clone()
    }

    /// Number of `fetch` calls so far.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    async fn record(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<(), GamewishError> {
        if self.failing_chats.lock().await.contains(&chat_id) {
            return Err(GamewishError::Transport {
                message: format!("mock send to {chat_id} failed"),
                source: None,
            });
        }
        self.sent.lock().await.push(SentMessage {
            chat_id,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(())
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockTransport {
    fn name(&self) -> &str {
        "mock-transport"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Transport
    }

    async fn health_check(&self) -> Result<HealthStatus, GamewishError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GamewishError> {
        Ok(())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn fetch(&self, limit: u8, timeout: Duration) -> Result<Vec<Event>, GamewishError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.batches.lock().await.pop_front();
        match next {
            Some(Ok(mut events)) => {
                events.truncate(usize::from(limit));
                Ok(events)
            }
            Some(Err(message)) => Err(GamewishError::Transport {
                message,
                source: None,
            }),
            None => {
                tokio::time::sleep(timeout.min(EMPTY_POLL)).await;
                Ok(Vec::new())
            }
        }
    }

    async fn send(&self, chat_id: ChatId, text: &str) -> Result<(), GamewishError> {
        self.record(chat_id, text, None).await
    }

    async fn send_with_keyboard(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: &InlineKeyboard,
    ) -> Result<(), GamewishError> {
        // Telegram sends a keyboard without buttons as a plain message.
        let keyboard = (!keyboard.is_empty()).then_some(keyboard);
        self.record(chat_id, text, keyboard).await
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: &str,
        show_alert: bool,
    ) -> Result<(), GamewishError> {
        if self.failing_answers.load(Ordering::Relaxed) {
            return Err(GamewishError::Transport {
                message: format!("mock answer to {callback_id} failed"),
                source: None,
            });
        }
        self.answers.lock().await.push(CallbackAnswer {
            callback_id: callback_id.to_string(),
            text: text.to_string(),
            show_alert,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamewish_core::KeyboardButton;

    #[tokio::test]
    async fn fetch_returns_injected_batches_in_order() {
        let transport = MockTransport::new();
        transport
            .push_batch(vec![Event::message("1", 7, "alice", "Halo")])
            .await;
        transport.push_fetch_error("boom").await;

        let first = transport.fetch(10, Duration::from_secs(1)).await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].text, "Halo");

        let second = transport.fetch(10, Duration::from_secs(1)).await;
        assert!(matches!(second, Err(GamewishError::Transport { .. })));

        let third = transport.fetch(10, Duration::from_secs(1)).await.unwrap();
        assert!(third.is_empty());
        assert_eq!(transport.fetch_calls(), 3);
    }

    #[tokio::test]
    async fn fetch_respects_limit() {
        let transport = MockTransport::new();
        let events = (0..5)
            .map(|i| Event::message(i.to_string(), 7, "alice", "x"))
            .collect();
        transport.push_batch(events).await;
        let batch = transport.fetch(2, Duration::from_secs(1)).await.unwrap();
        assert_eq!(batch.len(), 2);
    }

    #[tokio::test]
    async fn sends_are_captured_with_keyboards() {
        let transport = MockTransport::new();
        let keyboard = InlineKeyboard::single_column([KeyboardButton::new("Halo", "select:1")]);
        transport.send(ChatId(7), "hello").await.unwrap();
        transport
            .send_with_keyboard(ChatId(8), "pick", &keyboard)
            .await
            .unwrap();

        let sent = transport.sent_messages().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].keyboard, None);
        assert_eq!(sent[1].keyboard.as_ref(), Some(&keyboard));
        assert_eq!(transport.sent_to(ChatId(8)).await.len(), 1);
    }

    #[tokio::test]
    async fn empty_keyboard_is_sent_as_plain_message() {
        let transport = MockTransport::new();
        transport
            .send_with_keyboard(ChatId(7), "nothing", &InlineKeyboard::default())
            .await
            .unwrap();
        assert_eq!(transport.last_sent().await.unwrap().keyboard, None);
    }

    #[tokio::test]
    async fn failing_answers_are_not_recorded() {
        let transport = MockTransport::new();
        transport.fail_answers(true);
        assert!(transport.answer_callback("cb-1", "", false).await.is_err());
        transport.fail_answers(false);
        transport.answer_callback("cb-2", "", false).await.unwrap();

        let answers = transport.answers().await;
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].callback_id, "cb-2");
    }

    #[tokio::test]
    async fn failing_chat_rejects_sends_until_recovered() {
        let transport = MockTransport::new();
        transport.fail_sends_to(ChatId(7)).await;
        assert!(transport.send(ChatId(7), "x").await.is_err());
        assert!(transport.send(ChatId(8), "x").await.is_ok());

        transport.recover(ChatId(7)).await;
        assert!(transport.send(ChatId(7), "x").await.is_ok());
        assert_eq!(transport.sent_messages().await.len(), 2);
    }
}
