// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered config loading with Figment.
//!
//! Lookup order: `./gamewish.toml` > `~/.config/gamewish/gamewish.toml` >
//! `/etc/gamewish/gamewish.toml`, with `GAMEWISH_` environment overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::GamewishConfig;

/// Sections that env keys are split on. Keys inside a section keep their underscores.
const SECTIONS: &[&str] = &["bot", "telegram", "igdb", "storage", "consumer", "notifier"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/gamewish/gamewish.toml`
/// 3. `~/.config/gamewish/gamewish.toml`
/// 4. `./gamewish.toml`
/// 5. `GAMEWISH_*` environment variables
pub fn load_config() -> Result<GamewishConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<GamewishConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GamewishConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<GamewishConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GamewishConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The Figment used by [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(GamewishConfig::default()))
        .merge(Toml::file("/etc/gamewish/gamewish.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("gamewish/gamewish.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("gamewish.toml"))
        .merge(env_provider())
}

/// Env provider mapping `GAMEWISH_TELEGRAM_BOT_TOKEN` to `telegram.bot_token`.
///
/// `Env::split("_")` would produce `telegram.bot.token`, so the section
/// prefix is rewritten explicitly instead.
fn env_provider() -> Env {
    Env::prefixed("GAMEWISH_").map(|key| map_env_key(key.as_str()).into())
}

/// Rewrites the first `<section>_` prefix of a lowercased env key into `<section>.`.
pub fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
