// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints that serde attributes cannot express.

use crate::diagnostic::ConfigError;
use crate::model::GamewishConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns every failure found, not just the first.
pub fn validate_config(config: &GamewishConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if !(1..=100).contains(&config.telegram.batch_size) {
        errors.push(ConfigError::Validation {
            message: format!(
                "telegram.batch_size must be between 1 and 100, got {}",
                config.telegram.batch_size
            ),
        });
    }

    if let Some(token) = &config.telegram.bot_token
        && !is_well_formed_token(token)
    {
        errors.push(ConfigError::Validation {
            message: "telegram.bot_token must look like `<bot id>:<secret>`".to_string(),
        });
    }

    for (key, value) in [
        ("telegram.poll_timeout_secs", config.telegram.poll_timeout_secs),
        ("telegram.send_timeout_secs", config.telegram.send_timeout_secs),
        ("consumer.retry_backoff_secs", config.consumer.retry_backoff_secs),
        ("notifier.interval_secs", config.notifier.interval_secs),
    ] {
        if value == 0 {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be greater than zero"),
            });
        }
    }

    if !(1..=500).contains(&config.igdb.result_limit) {
        errors.push(ConfigError::Validation {
            message: format!(
                "igdb.result_limit must be between 1 and 500, got {}",
                config.igdb.result_limit
            ),
        });
    }

    if config.igdb.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "igdb.base_url must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A bot token is `<numeric id>:<non-empty secret>`.
fn is_well_formed_token(token: &str) -> bool {
    match token.split_once(':') {
        Some((id, secret)) => {
            !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) && !secret.trim().is_empty()
        }
        None => false,
    }
}
