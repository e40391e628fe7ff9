// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! SQLite favourites store.
//!
//! This module handles all interactions with the SQLite database, including
//! schema creation and reading and writing favourite records.
//!
//! # Tables
//!
//! * `favourites` - One row per favourited book per user, unique on
//!   `(user_id, key)`.
//!
//! # Performance
//!
//! All queries use [`rusqlite::Connection::prepare_cached`] to reduce SQL
//! parsing overhead.

use anyhow::{Context, Result};
use rusqlite::{Connection, params};

use crate::{
    model::{FavouriteRecord, UserId},
    store::{FavouritesStore, StoreError},
};

pub(crate) struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens a connection to the SQLite database and configures performance
    /// settings.
    ///
    /// This function performs the following setup:
    /// * **WAL Mode**: Enables Write-Ahead Logging for better concurrency.
    /// * **Performance Tuning**: Sets synchronous mode to `NORMAL`.
    /// * **Schema**: Executes [`create_schema`] to ensure all tables and
    ///   indices exist.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The database file cannot be opened.
    /// * The initial PRAGMA configurations fail.
    /// * The schema initialization fails.
    pub(crate) fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database '{}'", path))?;

        let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
        if journal_mode != "wal" {
            anyhow::bail!(
                "Failed to switch to WAL mode. Current mode: {}",
                journal_mode
            );
        }

        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;

        conn.set_prepared_statement_cache_capacity(16);

        create_schema(&conn)?;

        Ok(Self { conn })
    }
}

/// Create the database schema.
///
/// The autoincrement `id` column preserves insertion order, which is the
/// order favourites are returned in.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS favourites (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            key TEXT NOT NULL,
            title TEXT NOT NULL,
            author_name TEXT,
            cover_i INTEGER,
            timestamp TEXT,
            UNIQUE (user_id, key)
        );

        CREATE INDEX IF NOT EXISTS idx_favourites_user_id ON favourites (user_id);

        COMMIT;",
    )
    .context("Failed to create schema")
}

impl FavouritesStore for SqliteStore {
    fn fetch_favourites(&self, user: &UserId) -> Result<Vec<FavouriteRecord>, StoreError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT key, title, author_name, cover_i, timestamp
             FROM favourites
             WHERE user_id = ?
             ORDER BY id",
        )?;

        let rows = stmt.query_map([user.as_str()], FavouriteRecord::from_row)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?.validate()?);
        }

        Ok(results)
    }

    fn is_favourite(&self, user: &UserId, key: &str) -> Result<bool, StoreError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT EXISTS (SELECT 1 FROM favourites WHERE user_id = ?1 AND key = ?2)",
        )?;
        let exists = stmt.query_row(params![user.as_str(), key], |r| r.get(0))?;

        Ok(exists)
    }

    fn add_favourite(&self, user: &UserId, record: &FavouriteRecord) -> Result<(), StoreError> {
        let sql = "
            INSERT INTO favourites (user_id, key, title, author_name, cover_i, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT (user_id, key)
            DO UPDATE SET
                title = excluded.title,
                author_name = excluded.author_name,
                cover_i = excluded.cover_i,
                timestamp = excluded.timestamp";

        let mut stmt = self.conn.prepare_cached(sql)?;
        stmt.execute(params![
            user.as_str(),
            record.key,
            record.title,
            record.author_name,
            record.cover_i,
            record.timestamp,
        ])?;

        Ok(())
    }

    fn remove_favourite(&self, user: &UserId, key: &str) -> Result<(), StoreError> {
        let mut stmt = self
            .conn
            .prepare_cached("DELETE FROM favourites WHERE user_id = ?1 AND key = ?2")?;
        stmt.execute(params![user.as_str(), key])?;

        Ok(())
    }
}
