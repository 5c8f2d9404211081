// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end flows across the processor, storage and notifier.
//!
//! Each test creates an isolated TestHarness with temp SQLite and mock
//! adapters. Tests are independent and order-insensitive.

use chrono::{DateTime, Duration, TimeZone, Utc};
use gamewish_bot::messages;
use gamewish_core::{ChatId, Game, GameSource, Platform, PlatformDate, SearchResult};
use gamewish_test_utils::TestHarness;

const CHAT: i64 = 4242;

fn monday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
}

async fn seed_catalog(h: &TestHarness, release: DateTime<Utc>) {
    h.search
        .add_results(
            "Silksong",
            vec![SearchResult {
                id: 115,
                name: "Hollow Knight: Silksong".into(),
                first_release_date: Some(release),
            }],
        )
        .await;
    h.search
        .add_game(Game {
            id: 115,
            name: "Hollow Knight: Silksong".into(),
            url: "https://www.igdb.com/games/hollow-knight-silksong".into(),
            release_dates: vec![
                PlatformDate {
                    platform: Platform {
                        id: 6,
                        name: "PC".into(),
                    },
                    date: release,
                },
                PlatformDate {
                    platform: Platform {
                        id: 130,
                        name: "Switch".into(),
                    },
                    date: release,
                },
            ],
            source: GameSource::Igdb,
        })
        .await;
}

// ---- Search, pick, get notified ----

#[tokio::test]
async fn search_pick_and_release_day_digest() {
    let h = TestHarness::new().await.unwrap();
    let release = monday() + Duration::days(4);
    seed_catalog(&h, release).await;

    h.send_text(CHAT, "hornet", "Silksong", monday()).await.unwrap();
    let results = h.transport.last_sent().await.unwrap();
    let keyboard = results.keyboard.unwrap();
    let select = keyboard.buttons().next().unwrap();
    assert_eq!(select.text, "Hollow Knight: Silksong (2026)");

    h.press(CHAT, "hornet", &select.callback_data, monday())
        .await
        .unwrap();
    assert_eq!(h.last_text(CHAT).await.unwrap(), messages::MSG_SAVED);

    // Nothing is due before release.
    let early = h.notify_tick(release - Duration::hours(1)).await.unwrap();
    assert_eq!(early.users_notified, 0);

    let on_day = h.notify_tick(release).await.unwrap();
    assert_eq!(on_day.users_notified, 1);
    assert_eq!(on_day.entries_marked, 1);
    assert_eq!(
        h.last_text(CHAT).await.unwrap(),
        "📢 Releasing today:\n\n🔥 Hollow Knight: Silksong\n🌐 https://www.igdb.com/games/hollow-knight-silksong"
    );

    // Already notified; later ticks stay quiet.
    let after = h.notify_tick(release + Duration::days(1)).await.unwrap();
    assert_eq!(after.users_notified, 0);
    assert_eq!(h.transport.sent_to(ChatId(CHAT)).await.len(), 3);
}

// ---- Manual entry, list, remove ----

#[tokio::test]
async fn manual_entry_listed_then_removed() {
    let h = TestHarness::new().await.unwrap();

    h.send_text(CHAT, "hornet", "Team Cherry Secret", monday())
        .await
        .unwrap();
    h.send_text(CHAT, "hornet", "24.12.2026", monday())
        .await
        .unwrap();

    h.send_text(CHAT, "hornet", "/list", monday()).await.unwrap();
    let list = h.last_text(CHAT).await.unwrap();
    assert!(list.contains("Team Cherry Secret"));
    assert!(list.contains("24.12.2026"));

    h.send_text(CHAT, "hornet", "/remove", monday()).await.unwrap();
    let menu = h.transport.last_sent().await.unwrap().keyboard.unwrap();
    let remove = menu.buttons().next().unwrap().callback_data.clone();
    h.press(CHAT, "hornet", &remove, monday()).await.unwrap();

    h.send_text(CHAT, "hornet", "/list", monday()).await.unwrap();
    assert_eq!(h.last_text(CHAT).await.unwrap(), messages::MSG_EMPTY_LIST);
}
