// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Release-day notification scheduler.
//!
//! Each tick fetches unnotified entries whose expected date has arrived,
//! sends one digest per chat, and marks entries only after that chat's
//! digest went out. Delivery is at-least-once: a crash between the send and
//! the mark repeats the digest on the next tick.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use gamewish_core::{ChatId, GamewishError, Transport, Wishlist, WishlistStorage};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::messages;

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyReport {
    pub users_notified: usize,
    pub users_failed: usize,
    pub entries_marked: usize,
}

pub struct ReleaseNotifier {
    storage: Arc<dyn WishlistStorage>,
    transport: Arc<dyn Transport>,
    interval: Duration,
}

impl ReleaseNotifier {
    pub fn new(
        storage: Arc<dyn WishlistStorage>,
        transport: Arc<dyn Transport>,
        interval: Duration,
    ) -> Self {
        Self {
            storage,
            transport,
            interval,
        }
    }

    /// Ticks every interval until `cancel` fires. The first tick runs
    /// immediately.
    pub async fn run(&self, cancel: CancellationToken) {
        info!(interval_secs = self.interval.as_secs(), "release notifier started");
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match self.tick(Utc::now()).await {
                        Ok(report) if report.users_notified + report.users_failed > 0 => {
                            info!(
                                users_notified = report.users_notified,
                                users_failed = report.users_failed,
                                entries_marked = report.entries_marked,
                                "release digests sent"
                            );
                        }
                        Ok(_) => debug!("no releases due"),
                        Err(e) => warn!(error = %e, "release notifier tick failed"),
                    }
                }
                _ = cancel.cancelled() => {
                    info!("release notifier shutting down");
                    break;
                }
            }
        }
    }

    /// Runs one notification pass as of `now`.
    pub async fn tick(&self, now: DateTime<Utc>) -> Result<NotifyReport, GamewishError> {
        let due = self.storage.get_to_notify(now).await?;
        let mut report = NotifyReport::default();
        if due.is_empty() {
            return Ok(report);
        }

        for (chat_id, entries) in group_by_chat(due) {
            let digest = messages::release_digest(entries.iter().map(|w| &w.game));
            if let Err(e) = self.transport.send(chat_id, &digest).await {
                warn!(%chat_id, error = %e, "release digest failed, retrying next tick");
                report.users_failed += 1;
                continue;
            }
            report.users_notified += 1;

            for entry in &entries {
                match self.storage.notify(entry, now).await {
                    Ok(()) => report.entries_marked += 1,
                    Err(e) => warn!(
                        wishlist_id = entry.id,
                        error = %e,
                        "failed to mark entry as notified"
                    ),
                }
            }
        }

        Ok(report)
    }
}

fn group_by_chat(entries: Vec<Wishlist>) -> BTreeMap<ChatId, Vec<Wishlist>> {
    let mut groups: BTreeMap<ChatId, Vec<Wishlist>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.user.chat_id).or_default().push(entry);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamewish_core::{GameRecord, User};

    fn entry(chat: i64, game: &str) -> Wishlist {
        let user = User {
            id: chat,
            name: format!("u{chat}"),
            chat_id: ChatId(chat),
        };
        Wishlist::new(user, GameRecord::manual(game), None)
    }

    #[test]
    fn grouping_keeps_order_within_chat() {
        let groups = group_by_chat(vec![
            entry(2, "Doom"),
            entry(1, "Halo"),
            entry(2, "Myst"),
        ]);
        let chats: Vec<_> = groups.keys().copied().collect();
        assert_eq!(chats, vec![ChatId(1), ChatId(2)]);
        let names: Vec<_> = groups[&ChatId(2)].iter().map(|w| w.game.name.as_str()).collect();
        assert_eq!(names, vec!["Doom", "Myst"]);
    }
}
