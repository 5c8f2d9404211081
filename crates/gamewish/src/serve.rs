// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `gamewish serve` command implementation.
//!
//! Opens SQLite storage, connects the Telegram transport and the IGDB
//! catalog, spawns the release notifier and runs the event consumer until
//! SIGINT or SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use gamewish_bot::shutdown;
use gamewish_bot::{EventConsumer, EventProcessor, ReleaseNotifier};
use gamewish_config::GamewishConfig;
use gamewish_core::{GameSearch, GamewishError, PluginAdapter, Transport, WishlistStorage};
use tracing::{info, warn};

#[cfg(feature = "sqlite")]
use gamewish_storage::SqliteStorage;

#[cfg(feature = "telegram")]
use gamewish_telegram::TelegramTransport;

#[cfg(feature = "igdb")]
use gamewish_igdb::IgdbSearch;

#[cfg(not(feature = "sqlite"))]
compile_error!("gamewish requires the 'sqlite' feature for storage");

#[cfg(not(feature = "telegram"))]
compile_error!("gamewish requires the 'telegram' feature for its transport");

#[cfg(not(feature = "igdb"))]
compile_error!("gamewish requires the 'igdb' feature for game search");

/// Runs the `gamewish serve` command.
pub async fn run_serve(config: GamewishConfig) -> Result<(), GamewishError> {
    init_tracing(&config.bot.log_level);

    info!("starting gamewish serve");

    let storage = {
        let storage = SqliteStorage::new(config.storage.clone());
        storage.initialize().await?;
        Arc::new(storage)
    };
    info!(path = %config.storage.database_path, "storage ready");

    let transport = Arc::new(TelegramTransport::new(config.telegram.clone())?);
    let search = Arc::new(IgdbSearch::new(&config.igdb)?);

    let cancel = shutdown::install_signal_handler();

    let processor = Arc::new(EventProcessor::new(
        storage.clone() as Arc<dyn WishlistStorage>,
        search.clone() as Arc<dyn GameSearch>,
        transport.clone() as Arc<dyn Transport>,
    ));

    let notifier_task = if config.notifier.enabled {
        let notifier = ReleaseNotifier::new(
            storage.clone() as Arc<dyn WishlistStorage>,
            transport.clone() as Arc<dyn Transport>,
            Duration::from_secs(config.notifier.interval_secs),
        );
        let notifier_cancel = cancel.clone();
        Some(tokio::spawn(async move {
            notifier.run(notifier_cancel).await;
        }))
    } else {
        info!("release notifier disabled");
        None
    };

    let consumer = EventConsumer::new(
        transport.clone() as Arc<dyn Transport>,
        processor,
        &config.telegram,
        &config.consumer,
    );
    let result = consumer.run(cancel.clone()).await;

    // Stop the notifier even if the consumer exited on its own.
    cancel.cancel();
    if let Some(task) = notifier_task {
        if let Err(e) = task.await {
            warn!(error = %e, "release notifier task ended abnormally");
        }
    }

    transport.shutdown().await?;
    search.shutdown().await?;
    storage.close().await?;

    info!("gamewish stopped");
    result
}

/// Installs the global tracing subscriber. `RUST_LOG` takes precedence.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gamewish={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
