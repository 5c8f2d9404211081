// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the WishlistStorage trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;
use tracing::debug;

use gamewish_config::model::StorageConfig;
use gamewish_core::{
    AdapterType, GamewishError, HealthStatus, PluginAdapter, User, Wishlist, WishlistStorage,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed wishlist storage.
///
/// The database is opened by [`WishlistStorage::initialize`]; every other
/// operation fails until then.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, GamewishError> {
        self.db.get().ok_or_else(|| GamewishError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, GamewishError> {
        let Ok(db) = self.db() else {
            return Ok(HealthStatus::Unhealthy("not initialized".to_string()));
        };
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GamewishError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl WishlistStorage for SqliteStorage {
    async fn initialize(&self) -> Result<(), GamewishError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| GamewishError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), GamewishError> {
        self.db()?.checkpoint().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    async fn add(&self, wishlist: &Wishlist) -> Result<i64, GamewishError> {
        queries::wishlist::add(self.db()?, wishlist).await
    }

    async fn is_exists(&self, wishlist: &Wishlist) -> Result<bool, GamewishError> {
        queries::wishlist::is_exists(self.db()?, wishlist).await
    }

    async fn get_user_by_name(&self, name: &str) -> Result<User, GamewishError> {
        queries::users::get_user_by_name(self.db()?, name).await
    }

    async fn get_all(&self, user: &User) -> Result<Vec<Wishlist>, GamewishError> {
        queries::wishlist::get_all(self.db()?, user).await
    }

    async fn remove(&self, wishlist_id: i64, user: &User) -> Result<(), GamewishError> {
        queries::wishlist::remove(self.db()?, wishlist_id, user).await
    }

    async fn get_to_notify(&self, now: DateTime<Utc>) -> Result<Vec<Wishlist>, GamewishError> {
        queries::wishlist::get_to_notify(self.db()?, now).await
    }

    async fn notify(&self, wishlist: &Wishlist, at: DateTime<Utc>) -> Result<(), GamewishError> {
        queries::wishlist::notify(self.db()?, wishlist, at).await
    }
}
