// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The fetch-and-process loop feeding the [`EventProcessor`].

use std::sync::Arc;
use std::time::Duration;

use gamewish_config::model::{ConsumerConfig, TelegramConfig};
use gamewish_core::{Event, GamewishError, Transport};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::processor::EventProcessor;

/// Outcome of one processed batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub failed: usize,
}

/// Long-polls the transport and processes events one at a time.
pub struct EventConsumer {
    transport: Arc<dyn Transport>,
    processor: Arc<EventProcessor>,
    batch_size: u8,
    poll_timeout: Duration,
    backoff: Duration,
}

impl EventConsumer {
    pub fn new(
        transport: Arc<dyn Transport>,
        processor: Arc<EventProcessor>,
        telegram: &TelegramConfig,
        consumer: &ConsumerConfig,
    ) -> Self {
        Self {
            transport,
            processor,
            batch_size: telegram.batch_size,
            poll_timeout: Duration::from_secs(telegram.poll_timeout_secs),
            backoff: Duration::from_secs(consumer.retry_backoff_secs),
        }
    }

    /// Overrides the pause after a failed fetch.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Runs until `cancel` fires.
    ///
    /// A batch that has already been fetched is always processed to the end
    /// before the loop exits.
    pub async fn run(&self, cancel: CancellationToken) -> Result<(), GamewishError> {
        info!(
            batch_size = self.batch_size,
            poll_timeout_secs = self.poll_timeout.as_secs(),
            "event consumer running"
        );

        loop {
            let fetched = tokio::select! {
                fetched = self.transport.fetch(self.batch_size, self.poll_timeout) => fetched,
                _ = cancel.cancelled() => break,
            };

            match fetched {
                Ok(events) => {
                    self.process_batch(events).await;
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        backoff_secs = self.backoff.as_secs_f64(),
                        "fetch failed, backing off"
                    );
                    tokio::select! {
                        _ = tokio::time::sleep(self.backoff) => {}
                        _ = cancel.cancelled() => break,
                    }
                }
            }

            if cancel.is_cancelled() {
                break;
            }
        }

        info!("event consumer stopped");
        Ok(())
    }

    /// Processes a batch sequentially. Failures are logged and skipped.
    pub async fn process_batch(&self, events: Vec<Event>) -> BatchReport {
        let mut report = BatchReport::default();
        for event in events {
            let event_id = event.id.clone();
            let chat_id = event.meta().map(|meta| meta.chat_id.0);
            match self.processor.process(event).await {
                Ok(()) => report.processed += 1,
                Err(e) => {
                    report.failed += 1;
                    error!(
                        event_id = event_id.as_str(),
                        chat_id,
                        error = %e,
                        "failed to process event"
                    );
                }
            }
        }
        report
    }
}
