// SPDX-FileCopyrightText: 2026 Gamewish Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game rows. Identity is `(source, external_url, name)`.

use gamewish_core::GameRecord;
use rusqlite::params;

/// Insert the game if unseen and return its id. Runs inside the caller's transaction.
pub(crate) fn upsert_game(conn: &rusqlite::Connection, game: &GameRecord) -> rusqlite::Result<i64> {
    let url = game.external_url.as_deref().unwrap_or_default();
    let source = game.source.to_string();
    conn.execute(
        "INSERT INTO game (name, source, external_url) VALUES (?1, ?2, ?3)
         ON CONFLICT(source, external_url, name) DO NOTHING",
        params![game.name, source, url],
    )?;
    conn.query_row(
        "SELECT id FROM game WHERE source = ?1 AND external_url = ?2 AND name = ?3",
        params![source, url, game.name],
        |row| row.get(0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use gamewish_core::GameSource;
    use tempfile::tempdir;

    #[tokio::test]
    async fn same_name_different_source_are_distinct() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("games.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        let (manual, manual_again, catalog) = db
            .connection()
            .call(|conn| {
                let manual = GameRecord::manual("Halo");
                let catalog = GameRecord {
                    id: 0,
                    name: "Halo".into(),
                    source: GameSource::Igdb,
                    external_url: Some("https://www.igdb.com/games/halo".into()),
                };
                Ok::<_, rusqlite::Error>((
                    upsert_game(conn, &manual)?,
                    upsert_game(conn, &manual)?,
                    upsert_game(conn, &catalog)?,
                ))
            })
            .await
            .unwrap();

        assert_eq!(manual, manual_again);
        assert_ne!(manual, catalog);
    }
}
