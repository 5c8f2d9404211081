// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user pending-action memory for the manual-date flow.

use dashmap::DashMap;

/// The single step a conversation can be parked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Waiting for a `DD.MM.YYYY` reply or an "add without date" press.
    AwaitingDate,
}

/// What the bot is waiting on for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationState {
    pub pending_game_name: String,
    pub step: Step,
}

impl ConversationState {
    pub fn awaiting_date(game_name: impl Into<String>) -> Self {
        Self {
            pending_game_name: game_name.into(),
            step: Step::AwaitingDate,
        }
    }
}

/// Single-slot state per user name, held in process memory only.
///
/// Backed by a [`DashMap`], so concurrent consumers only contend on the
/// shard holding the user in question.
#[derive(Debug, Default)]
pub struct ConversationStore {
    slots: DashMap<String, ConversationState>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever was pending for `user`.
    pub fn set(&self, user: &str, state: ConversationState) {
        self.slots.insert(user.to_string(), state);
    }

    pub fn get(&self, user: &str) -> Option<ConversationState> {
        self.slots.get(user).map(|entry| entry.value().clone())
    }

    /// Drops the pending state, returning it if there was one.
    pub fn clear(&self, user: &str) -> Option<ConversationState> {
        self.slots.remove(user).map(|(_, state)| state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_clear() {
        let store = ConversationStore::new();
        assert!(store.get("alice").is_none());

        store.set("alice", ConversationState::awaiting_date("Halo"));
        let state = store.get("alice").unwrap();
        assert_eq!(state.pending_game_name, "Halo");
        assert_eq!(state.step, Step::AwaitingDate);

        assert_eq!(store.clear("alice"), Some(state));
        assert!(store.get("alice").is_none());
        assert!(store.clear("alice").is_none());
    }

    #[test]
    fn single_slot_is_overwritten() {
        let store = ConversationStore::new();
        store.set("alice", ConversationState::awaiting_date("Halo"));
        store.set("alice", ConversationState::awaiting_date("Myst"));
        assert_eq!(store.get("alice").unwrap().pending_game_name, "Myst");
        assert_eq!(store.clear("alice").unwrap().pending_game_name, "Myst");
        assert!(store.get("alice").is_none());
    }

    #[test]
    fn users_are_independent() {
        let store = ConversationStore::new();
        store.set("alice", ConversationState::awaiting_date("Halo"));
        store.set("bob", ConversationState::awaiting_date("Doom"));
        store.clear("alice");
        assert!(store.get("alice").is_none());
        assert_eq!(store.get("bob").unwrap().pending_game_name, "Doom");
    }

    #[test]
    fn shared_across_threads() {
        let store = std::sync::Arc::new(ConversationStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.set(&format!("user{i}"), ConversationState::awaiting_date("Game"));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        for i in 0..8 {
            assert!(store.get(&format!("user{i}")).is_some());
        }
    }
}
