// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Gamewish bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Gamewish configuration.
///
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GamewishConfig {
    /// Process-wide settings.
    #[serde(default)]
    pub bot: BotConfig,

    /// Telegram transport settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// IGDB catalog settings.
    #[serde(default)]
    pub igdb: IgdbConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Event consume loop settings.
    #[serde(default)]
    pub consumer: ConsumerConfig,

    /// Release notification scheduler settings.
    #[serde(default)]
    pub notifier: NotifierConfig,
}

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram transport configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. Required by `serve`.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Telegram user ids or usernames allowed to talk to the bot. Empty allows everyone.
    #[serde(default)]
    pub allowed_users: Vec<String>,

    /// Maximum number of updates per `getUpdates` call (1..=100).
    #[serde(default = "default_batch_size")]
    pub batch_size: u8,

    /// Long-poll timeout passed to `getUpdates`.
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,

    /// Upper bound on a single outbound API call.
    #[serde(default = "default_send_timeout_secs")]
    pub send_timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            allowed_users: Vec::new(),
            batch_size: default_batch_size(),
            poll_timeout_secs: default_poll_timeout_secs(),
            send_timeout_secs: default_send_timeout_secs(),
        }
    }
}

fn default_batch_size() -> u8 {
    100
}

fn default_poll_timeout_secs() -> u64 {
    60
}

fn default_send_timeout_secs() -> u64 {
    30
}

/// IGDB catalog configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IgdbConfig {
    /// API root. Overridable for proxies and tests.
    #[serde(default = "default_igdb_base_url")]
    pub base_url: String,

    /// Twitch application client id.
    #[serde(default)]
    pub client_id: Option<String>,

    /// App access token issued by Twitch.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Token type as returned by the Twitch token endpoint.
    #[serde(default = "default_token_type")]
    pub token_type: String,

    /// Maximum number of search hits shown to the user.
    #[serde(default = "default_result_limit")]
    pub result_limit: u32,
}

impl Default for IgdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_igdb_base_url(),
            client_id: None,
            access_token: None,
            token_type: default_token_type(),
            result_limit: default_result_limit(),
        }
    }
}

fn default_igdb_base_url() -> String {
    "https://api.igdb.com/v4".to_string()
}

fn default_token_type() -> String {
    "bearer".to_string()
}

fn default_result_limit() -> u32 {
    10
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("gamewish").join("gamewish.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("gamewish.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Event consume loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConsumerConfig {
    /// Pause after a failed fetch before polling again.
    #[serde(default = "default_retry_backoff_secs")]
    pub retry_backoff_secs: u64,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            retry_backoff_secs: default_retry_backoff_secs(),
        }
    }
}

fn default_retry_backoff_secs() -> u64 {
    3
}

/// Release notification scheduler configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NotifierConfig {
    #[serde(default = "default_notifier_enabled")]
    pub enabled: bool,

    /// Seconds between two scans for due entries.
    #[serde(default = "default_notifier_interval_secs")]
    pub interval_secs: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            enabled: default_notifier_enabled(),
            interval_secs: default_notifier_interval_secs(),
        }
    }
}

fn default_notifier_enabled() -> bool {
    true
}

fn default_notifier_interval_secs() -> u64 {
    3600
}
