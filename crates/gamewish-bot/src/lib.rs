// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event interpretation and release-date scheduling for Gamewish.
//!
//! - [`codec`] encodes button payloads as `action:id[:args]`
//! - [`dates`] decides how a game gets its expected release date
//! - [`state`] remembers the one pending action per user
//! - [`processor`] dispatches inbound events
//! - [`consumer`] feeds fetched events to the processor
//! - [`notifier`] sends release-day digests on a timer

pub mod codec;
pub mod consumer;
pub mod dates;
pub mod messages;
pub mod notifier;
pub mod processor;
pub mod shutdown;
pub mod state;

pub use codec::{CallbackAction, CallbackData};
pub use consumer::{BatchReport, EventConsumer};
pub use notifier::{NotifyReport, ReleaseNotifier};
pub use processor::{Command, EventProcessor};
pub use state::{ConversationState, ConversationStore, Step};
