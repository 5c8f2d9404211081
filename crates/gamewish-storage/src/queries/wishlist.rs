// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wishlist CRUD and the notification queries.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use gamewish_core::{ChatId, GameRecord, GameSource, GamewishError, User, Wishlist};
use rusqlite::params;
use rusqlite::types::Type;

use super::{from_sql_opt_time, to_sql_time};
use crate::database::Database;
use crate::queries::{games, users};

const SELECT_WISHLIST: &str = "
    SELECT w.id, w.expected_release_date, w.added_at, w.notified_at,
           g.id, g.name, g.source, g.external_url,
           u.id, u.name, u.chat_id
    FROM wishlist w
    INNER JOIN game g ON g.id = w.game_id
    INNER JOIN user u ON u.id = w.user_id";

fn row_to_wishlist(row: &rusqlite::Row<'_>) -> rusqlite::Result<Wishlist> {
    let source: String = row.get(6)?;
    let source = GameSource::from_str(&source)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;
    let url: String = row.get(7)?;

    Ok(Wishlist {
        id: row.get(0)?,
        expected_release_date: from_sql_opt_time(1, row.get(1)?)?,
        added_at: from_sql_opt_time(2, row.get(2)?)?,
        notified_at: from_sql_opt_time(3, row.get(3)?)?,
        game: GameRecord {
            id: row.get(4)?,
            name: row.get(5)?,
            source,
            external_url: (!url.is_empty()).then_some(url),
        },
        user: User {
            id: row.get(8)?,
            name: row.get(9)?,
            chat_id: ChatId(row.get(10)?),
        },
    })
}

/// Insert an entry, upserting its user and game in the same transaction.
/// Returns the new wishlist id.
pub async fn add(db: &Database, wishlist: &Wishlist) -> Result<i64, GamewishError> {
    let wishlist = wishlist.clone();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let user_id = users::upsert_user(&tx, &wishlist.user)?;
            let game_id = games::upsert_game(&tx, &wishlist.game)?;
            tx.execute(
                "INSERT INTO wishlist (user_id, game_id, expected_release_date, added_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    user_id,
                    game_id,
                    wishlist.expected_release_date.map(to_sql_time),
                    to_sql_time(wishlist.added_at.unwrap_or_else(Utc::now)),
                ],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            Ok(id)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Whether the user already tracks this game. Unknown users track nothing.
pub async fn is_exists(db: &Database, wishlist: &Wishlist) -> Result<bool, GamewishError> {
    let name = wishlist.user.name.clone();
    let chat_id = wishlist.user.chat_id.0;
    let game = wishlist.game.clone();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT EXISTS(
                    SELECT 1 FROM wishlist w
                    INNER JOIN user u ON u.id = w.user_id
                    INNER JOIN game g ON g.id = w.game_id
                    WHERE u.name = ?1 AND u.chat_id = ?2
                      AND g.name = ?3 AND g.source = ?4 AND g.external_url = ?5)",
                params![
                    name,
                    chat_id,
                    game.name,
                    game.source.to_string(),
                    game.external_url.as_deref().unwrap_or_default(),
                ],
                |row| row.get(0),
            )
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All entries of one user, ordered by game name.
pub async fn get_all(db: &Database, user: &User) -> Result<Vec<Wishlist>, GamewishError> {
    let name = user.name.clone();
    let chat_id = user.chat_id.0;
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_WISHLIST}
                 WHERE u.name = ?1 AND u.chat_id = ?2
                 ORDER BY g.name, w.id"
            ))?;
            let rows = stmt.query_map(params![name, chat_id], row_to_wishlist)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete one entry owned by `user`. Fails with [`GamewishError::NoWishlist`]
/// when the id is unknown or belongs to someone else.
pub async fn remove(db: &Database, wishlist_id: i64, user: &User) -> Result<(), GamewishError> {
    let name = user.name.clone();
    let chat_id = user.chat_id.0;
    let deleted = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "DELETE FROM wishlist
                 WHERE id = ?1
                   AND user_id IN (SELECT id FROM user WHERE name = ?2 AND chat_id = ?3)",
                params![wishlist_id, name, chat_id],
            )
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    if deleted == 0 {
        return Err(GamewishError::NoWishlist);
    }
    Ok(())
}

/// Unnotified entries due at or before `now`, grouped by chat.
pub async fn get_to_notify(
    db: &Database,
    now: DateTime<Utc>,
) -> Result<Vec<Wishlist>, GamewishError> {
    let now = to_sql_time(now);
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_WISHLIST}
                 WHERE w.notified_at IS NULL
                   AND w.expected_release_date IS NOT NULL
                   AND w.expected_release_date <= ?1
                 ORDER BY u.chat_id, g.name"
            ))?;
            let rows = stmt.query_map(params![now], row_to_wishlist)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Set `notified_at` once. A row that is already marked keeps its first timestamp.
pub async fn notify(
    db: &Database,
    wishlist: &Wishlist,
    at: DateTime<Utc>,
) -> Result<(), GamewishError> {
    let id = wishlist.id;
    let at = to_sql_time(at);
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE wishlist SET notified_at = ?1 WHERE id = ?2 AND notified_at IS NULL",
                params![at, id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
