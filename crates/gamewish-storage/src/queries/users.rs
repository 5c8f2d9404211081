// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User lookups and the implicit upsert used by wishlist inserts.

use gamewish_core::{ChatId, GamewishError, User};
use rusqlite::{params, OptionalExtension};

use crate::database::Database;

/// Insert the user if unseen and return its id. Runs inside the caller's transaction.
pub(crate) fn upsert_user(conn: &rusqlite::Connection, user: &User) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO user (name, chat_id) VALUES (?1, ?2)
         ON CONFLICT(name, chat_id) DO NOTHING",
        params![user.name, user.chat_id.0],
    )?;
    conn.query_row(
        "SELECT id FROM user WHERE name = ?1 AND chat_id = ?2",
        params![user.name, user.chat_id.0],
        |row| row.get(0),
    )
}

/// Look a user up by name. Fails with [`GamewishError::NoUser`] if absent.
pub async fn get_user_by_name(db: &Database, name: &str) -> Result<User, GamewishError> {
    let name = name.to_string();
    let user = db
        .connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT id, name, chat_id FROM user WHERE name = ?1 ORDER BY id LIMIT 1",
                params![name],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        chat_id: ChatId(row.get(2)?),
                    })
                },
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    user.ok_or(GamewishError::NoUser)
}
