// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `gamewish doctor` command implementation.
//!
//! Builds each adapter from the loaded configuration and runs its health
//! check, printing one status line per adapter.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use gamewish_config::GamewishConfig;
use gamewish_core::{GamewishError, HealthStatus, PluginAdapter, WishlistStorage};

use gamewish_igdb::IgdbSearch;
use gamewish_storage::SqliteStorage;
use gamewish_telegram::TelegramTransport;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Run the `gamewish doctor` command.
pub async fn run_doctor(config: &GamewishConfig, plain: bool) -> Result<(), GamewishError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let results = vec![
        check_storage(config).await,
        check_telegram(config).await,
        check_igdb(config).await,
    ];

    println!();
    println!("  gamewish doctor");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", render_line(result, use_color));
    }
    println!();

    let issues = results
        .iter()
        .filter(|r| r.status != CheckStatus::Pass)
        .count();
    if issues > 0 {
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    Ok(())
}

/// Formats one status line.
fn render_line(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();
    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red(), result.message.red()),
        };
        format!(
            "    {symbol} {:<20} {message} ({duration_ms}ms)",
            result.name
        )
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!(
            "    {tag} {:<20} {} ({duration_ms}ms)",
            result.name, result.message
        )
    }
}

/// Maps an adapter health report onto a check result.
async fn check_adapter(name: &str, adapter: &dyn PluginAdapter, start: Instant) -> CheckResult {
    match adapter.health_check().await {
        Ok(HealthStatus::Healthy) => CheckResult::new(name, CheckStatus::Pass, "healthy", start),
        Ok(HealthStatus::Degraded(msg)) => CheckResult::new(name, CheckStatus::Warn, msg, start),
        Ok(HealthStatus::Unhealthy(msg)) => CheckResult::new(name, CheckStatus::Fail, msg, start),
        Err(e) => CheckResult::new(name, CheckStatus::Fail, e.to_string(), start),
    }
}

/// Missing credentials are a warning; anything else stopping construction is a failure.
fn construction_failure(name: &str, err: GamewishError, start: Instant) -> CheckResult {
    match err {
        GamewishError::Config(msg) => CheckResult::new(name, CheckStatus::Warn, msg, start),
        other => CheckResult::new(name, CheckStatus::Fail, other.to_string(), start),
    }
}

async fn check_storage(config: &GamewishConfig) -> CheckResult {
    let start = Instant::now();
    let storage = SqliteStorage::new(config.storage.clone());
    if let Err(e) = storage.initialize().await {
        return CheckResult::new("Storage", CheckStatus::Fail, e.to_string(), start);
    }
    let result = check_adapter("Storage", &storage, start).await;
    let _ = storage.close().await;
    result
}

async fn check_telegram(config: &GamewishConfig) -> CheckResult {
    let start = Instant::now();
    match TelegramTransport::new(config.telegram.clone()) {
        Ok(transport) => check_adapter("Telegram", &transport, start).await,
        Err(e) => construction_failure("Telegram", e, start),
    }
}

async fn check_igdb(config: &GamewishConfig) -> CheckResult {
    let start = Instant::now();
    match IgdbSearch::new(&config.igdb) {
        Ok(search) => check_adapter("IGDB", &search, start).await,
        Err(e) => construction_failure("IGDB", e, start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_tagged() {
        let result = CheckResult {
            name: "Storage".into(),
            status: CheckStatus::Warn,
            message: "slow".into(),
            duration: Duration::from_millis(12),
        };
        let line = render_line(&result, false);
        assert!(line.contains("[WARN]"));
        assert!(line.contains("Storage"));
        assert!(line.contains("slow (12ms)"));
    }

    #[tokio::test]
    async fn missing_credentials_warn() {
        let config = GamewishConfig::default();
        let telegram = check_telegram(&config).await;
        assert_eq!(telegram.status, CheckStatus::Warn);
        let igdb = check_igdb(&config).await;
        assert_eq!(igdb.status, CheckStatus::Warn);
    }

    #[tokio::test]
    async fn storage_check_passes_on_fresh_database() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GamewishConfig::default();
        config.storage.database_path = dir.path().join("doctor.db").to_string_lossy().to_string();

        let result = check_storage(&config).await;
        assert_eq!(result.status, CheckStatus::Pass, "{}", result.message);
    }
}
