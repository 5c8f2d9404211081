// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a processor and a notifier over a temp SQLite
//! database and the mock transport and catalog. `send_text()` and `press()`
//! drive the full event pipeline at a caller-chosen time.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use gamewish_bot::{EventProcessor, NotifyReport, ReleaseNotifier};
use gamewish_config::model::StorageConfig;
use gamewish_core::{ChatId, Event, GamewishError, GameSearch, Transport, WishlistStorage};
use gamewish_storage::SqliteStorage;

use crate::mock_search::MockSearch;
use crate::mock_transport::MockTransport;

/// A complete test environment with mock adapters and temp storage.
pub struct TestHarness {
    /// SQLite storage adapter (temp DB, cleaned up on drop).
    pub storage: Arc<SqliteStorage>,
    pub transport: Arc<MockTransport>,
    pub search: Arc<MockSearch>,
    pub processor: Arc<EventProcessor>,
    pub notifier: ReleaseNotifier,
    next_event_id: std::sync::atomic::AtomicU64,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Build the harness, creating and migrating a fresh database.
    pub async fn new() -> Result<Self, GamewishError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| GamewishError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let storage = Arc::new(SqliteStorage::new(StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        }));
        storage.initialize().await?;

        let transport = Arc::new(MockTransport::new());
        let search = Arc::new(MockSearch::new());

        let processor = Arc::new(EventProcessor::new(
            storage.clone() as Arc<dyn WishlistStorage>,
            search.clone() as Arc<dyn GameSearch>,
            transport.clone() as Arc<dyn Transport>,
        ));
        let notifier = ReleaseNotifier::new(
            storage.clone() as Arc<dyn WishlistStorage>,
            transport.clone() as Arc<dyn Transport>,
            Duration::from_secs(3600),
        );

        Ok(Self {
            storage,
            transport,
            search,
            processor,
            notifier,
            next_event_id: std::sync::atomic::AtomicU64::new(1),
            _temp_dir: temp_dir,
        })
    }

    fn event_id(&self) -> String {
        self.next_event_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
            .to_string()
    }

    /// Process a text message from `user` in chat `chat_id` as of `now`.
    pub async fn send_text(
        &self,
        chat_id: i64,
        user: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<(), GamewishError> {
        let event = Event::message(self.event_id(), chat_id, user, text);
        self.processor.process_at(event, now).await
    }

    /// Process a button press carrying `payload` as of `now`.
    pub async fn press(
        &self,
        chat_id: i64,
        user: &str,
        payload: &str,
        now: DateTime<Utc>,
    ) -> Result<(), GamewishError> {
        let event = Event::callback(self.event_id(), chat_id, user, payload);
        self.processor.process_at(event, now).await
    }

    /// Run one notifier tick.
    pub async fn notify_tick(&self, now: DateTime<Utc>) -> Result<NotifyReport, GamewishError> {
        self.notifier.tick(now).await
    }

    /// Text of the last message sent to `chat_id`.
    pub async fn last_text(&self, chat_id: i64) -> Option<String> {
        self.transport
            .sent_to(ChatId(chat_id))
            .await
            .pop()
            .map(|m| m.text)
    }
}
