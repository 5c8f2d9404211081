// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end event processing against a temp database and mock adapters.

use chrono::{DateTime, Duration, TimeZone, Utc};
use gamewish_bot::messages;
use gamewish_core::{
    ChatId, Event, EventKind, Game, GameSource, GamewishError, Platform, PlatformDate,
    SearchResult, WishlistStorage,
};
use gamewish_test_utils::TestHarness;
use tracing_test::traced_test;

const ALICE: i64 = 100;
const BOB: i64 = 200;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 10, 12, 0, 0).unwrap()
}

fn pd(id: i64, name: &str, date: DateTime<Utc>) -> PlatformDate {
    PlatformDate {
        platform: Platform {
            id,
            name: name.into(),
        },
        date,
    }
}

fn game(id: i64, name: &str, dates: Vec<PlatformDate>) -> Game {
    Game {
        id,
        name: name.into(),
        url: format!("https://www.igdb.com/games/{}", name.to_lowercase()),
        release_dates: dates,
        source: GameSource::Igdb,
    }
}

async fn entries(h: &TestHarness, user: &str) -> Vec<gamewish_core::Wishlist> {
    match h.storage.get_user_by_name(user).await {
        Ok(u) => h.storage.get_all(&u).await.unwrap(),
        Err(GamewishError::NoUser) => Vec::new(),
        Err(e) => panic!("unexpected error: {e}"),
    }
}

#[tokio::test]
async fn halo_manual_date_scenario() {
    let h = TestHarness::new().await.unwrap();

    h.send_text(ALICE, "alice", "Halo", now()).await.unwrap();
    let prompt = h.transport.last_sent().await.unwrap();
    assert_eq!(prompt.text, messages::no_results("Halo"));
    let keyboard = prompt.keyboard.expect("keyboard");
    let buttons: Vec<_> = keyboard.buttons().collect();
    assert_eq!(buttons.len(), 1);
    assert_eq!(buttons[0].callback_data, "add_without_date");
    assert_eq!(
        h.processor.state().get("alice").unwrap().pending_game_name,
        "Halo"
    );

    h.send_text(ALICE, "alice", "01.01.2020", now()).await.unwrap();
    assert_eq!(h.last_text(ALICE).await.unwrap(), messages::MSG_DATE_IN_PAST);
    assert!(entries(&h, "alice").await.is_empty());
    assert!(h.processor.state().get("alice").is_some());

    h.send_text(ALICE, "alice", "01.01.2030", now()).await.unwrap();
    assert_eq!(h.last_text(ALICE).await.unwrap(), messages::MSG_SAVED);
    assert!(h.processor.state().get("alice").is_none());

    let list = entries(&h, "alice").await;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].game.name, "Halo");
    assert_eq!(list[0].game.source, GameSource::Manual);
    assert_eq!(
        list[0].expected_release_date,
        Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap())
    );
}

#[tokio::test]
async fn non_date_reply_clears_state_and_routes_command() {
    let h = TestHarness::new().await.unwrap();

    h.send_text(ALICE, "alice", "Halo", now()).await.unwrap();
    h.send_text(ALICE, "alice", "/help", now()).await.unwrap();

    assert!(h.processor.state().get("alice").is_none());
    assert_eq!(h.last_text(ALICE).await.unwrap(), messages::MSG_HELP);
}

#[tokio::test]
async fn add_without_date_uses_pending_name() {
    let h = TestHarness::new().await.unwrap();

    h.send_text(ALICE, "alice", "Obscure Indie", now()).await.unwrap();
    h.press(ALICE, "alice", "add_without_date", now()).await.unwrap();

    let list = entries(&h, "alice").await;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].game.name, "Obscure Indie");
    assert_eq!(list[0].expected_release_date, None);
    assert!(h.processor.state().get("alice").is_none());
}

#[tokio::test]
async fn add_without_date_without_pending_adds_nothing() {
    let h = TestHarness::new().await.unwrap();

    h.press(ALICE, "alice", "add_without_date", now()).await.unwrap();

    assert_eq!(h.last_text(ALICE).await.unwrap(), messages::MSG_NO_PENDING);
    assert!(entries(&h, "alice").await.is_empty());
}

#[tokio::test]
async fn search_results_become_select_buttons() {
    let h = TestHarness::new().await.unwrap();
    h.search
        .add_results(
            "Doom",
            vec![
                SearchResult {
                    id: 7,
                    name: "Doom".into(),
                    first_release_date: Some(Utc.with_ymd_and_hms(1993, 12, 10, 0, 0, 0).unwrap()),
                },
                SearchResult {
                    id: 8,
                    name: "Doom: The Dark Ages".into(),
                    first_release_date: None,
                },
            ],
        )
        .await;

    h.send_text(ALICE, "alice", "Doom", now()).await.unwrap();

    let sent = h.transport.last_sent().await.unwrap();
    assert_eq!(sent.text, messages::MSG_CHOOSE_GAME);
    let keyboard = sent.keyboard.unwrap();
    let buttons: Vec<_> = keyboard
        .buttons()
        .map(|b| (b.text.as_str(), b.callback_data.as_str()))
        .collect();
    assert_eq!(
        buttons,
        vec![("Doom (1993)", "select:7"), ("Doom: The Dark Ages", "select:8")]
    );
    assert!(h.processor.state().get("alice").is_none());
}

#[tokio::test]
async fn duplicate_add_is_rejected_without_write() {
    let h = TestHarness::new().await.unwrap();
    h.search.add_game(game(1, "Doom", vec![])).await;

    h.press(ALICE, "alice", "select:1", now()).await.unwrap();
    assert_eq!(h.last_text(ALICE).await.unwrap(), messages::MSG_SAVED);

    h.press(ALICE, "alice", "select:1", now()).await.unwrap();
    assert_eq!(
        h.last_text(ALICE).await.unwrap(),
        messages::MSG_ALREADY_EXISTS
    );
    assert_eq!(entries(&h, "alice").await.len(), 1);
}

#[tokio::test]
async fn select_with_shared_future_date_adds_directly() {
    let h = TestHarness::new().await.unwrap();
    let release = now() + Duration::days(40);
    h.search
        .add_game(game(2, "Myst", vec![pd(6, "PC", release), pd(48, "PS4", release)]))
        .await;

    h.press(ALICE, "alice", "select:2", now()).await.unwrap();

    let list = entries(&h, "alice").await;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].expected_release_date, Some(release));
    assert_eq!(
        list[0].game.external_url.as_deref(),
        Some("https://www.igdb.com/games/myst")
    );
}

#[tokio::test]
async fn select_with_mixed_dates_offers_choice_then_adds_chosen() {
    let h = TestHarness::new().await.unwrap();
    let past = now() - Duration::days(10);
    let future = Utc.with_ymd_and_hms(2026, 11, 20, 0, 0, 0).unwrap();
    h.search
        .add_game(game(
            3,
            "Hades",
            vec![pd(6, "PC", past), pd(130, "Switch", past), pd(167, "PS5", future)],
        ))
        .await;

    h.press(ALICE, "alice", "select:3", now()).await.unwrap();

    let sent = h.transport.last_sent().await.unwrap();
    assert_eq!(sent.text, messages::MSG_CHOOSE_DATE);
    let keyboard = sent.keyboard.unwrap();
    let buttons: Vec<_> = keyboard
        .buttons()
        .map(|b| (b.text.clone(), b.callback_data.clone()))
        .collect();
    assert_eq!(
        buttons,
        vec![
            ("PS5 📅 20.11.2026".to_string(), "add:3:167".to_string()),
            ("PC | Switch (earlier)".to_string(), "add:3".to_string()),
        ]
    );
    assert!(entries(&h, "alice").await.is_empty());

    h.press(ALICE, "alice", "add:3:167", now()).await.unwrap();
    let list = entries(&h, "alice").await;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].expected_release_date, Some(future));
}

#[tokio::test]
async fn earlier_button_adds_without_date() {
    let h = TestHarness::new().await.unwrap();
    h.search
        .add_game(game(3, "Hades", vec![pd(6, "PC", now() - Duration::days(1))]))
        .await;

    h.press(ALICE, "alice", "add:3", now()).await.unwrap();

    let list = entries(&h, "alice").await;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].expected_release_date, None);
}

#[tokio::test]
async fn unknown_platform_fails_but_is_acknowledged() {
    let h = TestHarness::new().await.unwrap();
    h.search
        .add_game(game(4, "Celeste", vec![pd(6, "PC", now() + Duration::days(3))]))
        .await;

    let result = h.press(ALICE, "alice", "add:4:999", now()).await;

    assert!(matches!(
        result,
        Err(GamewishError::PlatformNotFound { game_id: 4 })
    ));
    let answers = h.transport.answers().await;
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].text, "");
    assert!(!answers[0].show_alert);
    assert!(entries(&h, "alice").await.is_empty());
}

#[tokio::test]
#[traced_test]
async fn failed_acknowledgement_is_logged_and_entry_still_added() {
    let h = TestHarness::new().await.unwrap();
    let release = now() + Duration::days(40);
    h.search
        .add_game(game(2, "Myst", vec![pd(6, "PC", release)]))
        .await;
    h.transport.fail_answers(true);

    h.press(ALICE, "alice", "select:2", now()).await.unwrap();

    assert_eq!(entries(&h, "alice").await.len(), 1);
    assert!(h.transport.answers().await.is_empty());
    assert!(logs_contain("failed to answer callback"));
}

#[tokio::test]
async fn malformed_callback_is_acknowledged() {
    let h = TestHarness::new().await.unwrap();

    let result = h.press(ALICE, "alice", "select:abc", now()).await;

    assert!(matches!(result, Err(GamewishError::MalformedCallback(p)) if p == "select:abc"));
    assert_eq!(h.transport.answers().await.len(), 1);
}

#[tokio::test]
async fn press_without_payload_is_acknowledged() {
    let h = TestHarness::new().await.unwrap();

    let result = h.press(ALICE, "alice", "", now()).await;

    assert!(matches!(result, Err(GamewishError::MalformedCallback(p)) if p.is_empty()));
    assert_eq!(h.transport.answers().await.len(), 1);
}

#[tokio::test]
async fn every_successful_callback_is_acknowledged() {
    let h = TestHarness::new().await.unwrap();
    h.search.add_game(game(1, "Doom", vec![])).await;

    h.press(ALICE, "alice", "select:1", now()).await.unwrap();
    h.press(ALICE, "alice", "add_without_date", now()).await.unwrap();

    let answers = h.transport.answers().await;
    assert_eq!(answers.len(), 2);
    assert_ne!(answers[0].callback_id, answers[1].callback_id);
}

#[tokio::test]
async fn list_for_unknown_user_is_empty_state() {
    let h = TestHarness::new().await.unwrap();

    h.send_text(ALICE, "alice", "/list", now()).await.unwrap();

    assert_eq!(h.last_text(ALICE).await.unwrap(), messages::MSG_EMPTY_LIST);
}

#[tokio::test]
async fn list_renders_digest_ordered_by_name() {
    let h = TestHarness::new().await.unwrap();
    h.search.add_game(game(1, "Zelda", vec![])).await;
    h.search.add_game(game(2, "Astro Bot", vec![])).await;

    h.press(ALICE, "alice", "select:1", now()).await.unwrap();
    h.press(ALICE, "alice", "select:2", now()).await.unwrap();
    h.send_text(ALICE, "alice", "/list", now()).await.unwrap();

    let text = h.last_text(ALICE).await.unwrap();
    assert!(text.starts_with(messages::MSG_LIST_HEADER));
    let astro = text.find("Astro Bot").unwrap();
    let zelda = text.find("Zelda").unwrap();
    assert!(astro < zelda);
    assert!(text.contains("https://www.igdb.com/games/zelda"));
}

#[tokio::test]
async fn remove_flow_and_missing_entry() {
    let h = TestHarness::new().await.unwrap();
    h.search.add_game(game(1, "Doom", vec![])).await;
    h.press(ALICE, "alice", "select:1", now()).await.unwrap();

    h.send_text(ALICE, "alice", "/remove", now()).await.unwrap();
    let menu = h.transport.last_sent().await.unwrap();
    assert_eq!(menu.text, messages::MSG_CHOOSE_REMOVE);
    let keyboard = menu.keyboard.unwrap();
    let payload = keyboard.buttons().next().unwrap().callback_data.clone();
    assert!(payload.starts_with("remove:"));

    h.press(ALICE, "alice", &payload, now()).await.unwrap();
    assert_eq!(h.last_text(ALICE).await.unwrap(), messages::MSG_REMOVED);
    assert!(entries(&h, "alice").await.is_empty());

    h.press(ALICE, "alice", &payload, now()).await.unwrap();
    assert_eq!(h.last_text(ALICE).await.unwrap(), messages::MSG_NOT_FOUND);
}

#[tokio::test]
async fn remove_is_scoped_to_pressing_user() {
    let h = TestHarness::new().await.unwrap();
    h.search.add_game(game(1, "Doom", vec![])).await;
    h.press(ALICE, "alice", "select:1", now()).await.unwrap();
    let id = entries(&h, "alice").await[0].id;

    h.press(BOB, "bob", &format!("remove:{id}"), now()).await.unwrap();

    assert_eq!(h.last_text(BOB).await.unwrap(), messages::MSG_NOT_FOUND);
    assert_eq!(entries(&h, "alice").await.len(), 1);
}

#[tokio::test]
async fn remove_menu_for_empty_list() {
    let h = TestHarness::new().await.unwrap();

    h.send_text(ALICE, "alice", "/remove", now()).await.unwrap();

    assert_eq!(h.last_text(ALICE).await.unwrap(), messages::MSG_EMPTY_LIST);
}

#[tokio::test]
async fn start_greets_and_explains() {
    let h = TestHarness::new().await.unwrap();

    h.send_text(ALICE, "alice", "/start", now()).await.unwrap();

    let text = h.last_text(ALICE).await.unwrap();
    assert!(text.starts_with(messages::MSG_HELLO));
    assert!(text.contains("/list"));
}

#[tokio::test]
async fn commands_are_case_sensitive() {
    let h = TestHarness::new().await.unwrap();

    h.send_text(ALICE, "alice", "/LIST", now()).await.unwrap();

    assert_eq!(h.search.queries().await, vec!["/LIST"]);
}

#[tokio::test]
async fn unknown_event_and_meta_are_rejected() {
    let h = TestHarness::new().await.unwrap();

    let unknown = Event {
        id: "1".into(),
        kind: EventKind::Unknown,
        text: String::new(),
    };
    assert!(matches!(
        h.processor.process_at(unknown, now()).await,
        Err(GamewishError::UnknownEventType)
    ));

    assert!(matches!(
        h.send_text(0, "alice", "/help", now()).await,
        Err(GamewishError::UnknownMetaType)
    ));
    assert!(matches!(
        h.send_text(ALICE, "", "/help", now()).await,
        Err(GamewishError::UnknownMetaType)
    ));
    assert!(h.transport.sent_messages().await.is_empty());
}

#[tokio::test]
async fn users_get_separate_conversations() {
    let h = TestHarness::new().await.unwrap();

    h.send_text(ALICE, "alice", "Halo", now()).await.unwrap();
    h.send_text(BOB, "bob", "01.01.2030", now()).await.unwrap();

    // bob had nothing pending, so his date was treated as a search
    assert_eq!(h.search.queries().await, vec!["Halo", "01.01.2030"]);
    assert!(entries(&h, "bob").await.is_empty());
    assert!(h.processor.state().get("alice").is_some());
    assert_eq!(
        h.transport.sent_to(ChatId(BOB)).await[0].text,
        messages::no_results("01.01.2030")
    );
}
