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

//! Database row mapping for domain models.
//!
//! This module provides the conversion logic between raw SQLite result rows
//! and favourite records, ensuring type-safe extraction of record attributes
//! from database queries.

use rusqlite::Row;

use crate::{model::FavouriteRecord, store::StoreError};

impl FavouriteRecord {
    /// Maps an SQLite row to a [`FavouriteRecord`] instance.
    ///
    /// This is a helper function designed to be used with
    /// [`rusqlite::Statement::query_map`]. Columns are expected in the order
    /// `key, title, author_name, cover_i, timestamp`.
    ///
    /// # Errors
    ///
    /// Returns a [`rusqlite::Error`] if:
    /// * The row does not contain enough columns.
    /// * The data in a column cannot be converted to the required Rust type.
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            key: row.get(0)?,
            title: row.get(1)?,
            author_name: row.get(2)?,
            cover_i: row.get(3)?,
            timestamp: row.get(4)?,
        })
    }

    /// Rejects records the rest of the application cannot identify.
    pub(crate) fn validate(self) -> Result<Self, StoreError> {
        if self.key.trim().is_empty() {
            return Err(StoreError::Malformed(format!(
                "record '{}' has an empty key",
                self.title
            )));
        }

        Ok(self)
    }
}
