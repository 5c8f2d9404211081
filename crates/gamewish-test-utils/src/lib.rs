// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Gamewish integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without Telegram or IGDB.
//!
//! # Components
//!
//! - [`MockTransport`] - Injectable fetch batches, captured sends and callback answers
//! - [`MockSearch`] - Canned search results and game details
//! - [`TestHarness`] - Temp SQLite storage wired to the mocks, a processor and a notifier

pub mod harness;
pub mod mock_search;
pub mod mock_transport;

pub use harness::TestHarness;
pub use mock_search::MockSearch;
pub use mock_transport::{CallbackAnswer, MockTransport, SentMessage};
