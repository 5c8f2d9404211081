// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits the bot engine is written against.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod search;
pub mod storage;
pub mod transport;

pub use adapter::PluginAdapter;
pub use search::GameSearch;
pub use storage::WishlistStorage;
pub use transport::Transport;
