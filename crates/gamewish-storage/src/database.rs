// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use std::path::Path;

use gamewish_core::GamewishError;
use tracing::debug;

use crate::migrations::run_migrations;

/// Handle to the single SQLite connection.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (creating if needed) the database at `path` in WAL mode and run migrations.
    pub async fn open(path: &str) -> Result<Self, GamewishError> {
        Self::open_with(path, true).await
    }

    /// Like [`Database::open`], with WAL mode selectable.
    pub async fn open_with(path: &str, wal_mode: bool) -> Result<Self, GamewishError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| GamewishError::Storage {
                source: Box::new(e),
            })?;
        }

        // Schema setup happens on a plain connection before the async handle exists.
        let setup_path = path.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), GamewishError> {
            let mut conn = rusqlite::Connection::open(&setup_path).map_err(storage_err)?;
            let journal = if wal_mode { "WAL" } else { "DELETE" };
            conn.execute_batch(&format!("PRAGMA journal_mode = {journal};"))
                .map_err(storage_err)?;
            run_migrations(&mut conn)
        })
        .await
        .map_err(|e| GamewishError::Internal(format!("migration task failed: {e}")))??;

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| GamewishError::Storage {
                source: Box::new(e),
            })?;

        conn.call(|conn| -> Result<(), rusqlite::Error> {
            conn.execute_batch(
                "PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;
                 PRAGMA synchronous = NORMAL;",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// The underlying async connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Flush the WAL into the main database file.
    pub async fn checkpoint(&self) -> Result<(), GamewishError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}

fn storage_err(e: rusqlite::Error) -> GamewishError {
    GamewishError::Storage {
        source: Box::new(e),
    }
}

/// Wrap a tokio-rusqlite error as a storage error.
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> GamewishError {
    GamewishError::Storage {
        source: Box::new(e),
    }
}
