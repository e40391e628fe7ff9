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

//! Favourites store access layer.
//!
//! The store is the per-user persistence service for favourite records. The
//! rest of the application only sees the [`FavouritesStore`] trait; the
//! concrete implementation is an SQLite database (see [`sqlite`]).
//!
//! All store access happens on the task worker thread, never on the UI
//! thread.

#[cfg(test)]
pub(crate) mod memory;
mod model;
pub(crate) mod sqlite;

use thiserror::Error;

use crate::model::{FavouriteRecord, UserId};

/// Failures raised by a favourites store.
///
/// These carry operator-facing detail and are never shown to the user
/// verbatim.
#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("favourites store is unavailable: {0}")]
    Unavailable(String),

    #[error("malformed favourite record: {0}")]
    Malformed(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Per-user favourites persistence.
///
/// Every mutation is a complete, self-contained operation: adding an existing
/// key replaces it and removing a missing key succeeds, so repeated requests
/// cannot corrupt the collection.
pub(crate) trait FavouritesStore {
    /// Returns every favourite for `user`, in the store's natural order.
    fn fetch_favourites(&self, user: &UserId) -> Result<Vec<FavouriteRecord>, StoreError>;

    fn is_favourite(&self, user: &UserId, key: &str) -> Result<bool, StoreError>;

    fn add_favourite(&self, user: &UserId, record: &FavouriteRecord) -> Result<(), StoreError>;

    fn remove_favourite(&self, user: &UserId, key: &str) -> Result<(), StoreError>;
}

/// A store that could not be reached.
///
/// Used when the database fails to open so that every request resolves to a
/// renderable error instead of taking the application down.
pub(crate) struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> StoreError {
        StoreError::Unavailable(self.reason.clone())
    }
}

impl FavouritesStore for UnavailableStore {
    fn fetch_favourites(&self, _user: &UserId) -> Result<Vec<FavouriteRecord>, StoreError> {
        Err(self.error())
    }

    fn is_favourite(&self, _user: &UserId, _key: &str) -> Result<bool, StoreError> {
        Err(self.error())
    }

    fn add_favourite(&self, _user: &UserId, _record: &FavouriteRecord) -> Result<(), StoreError> {
        Err(self.error())
    }

    fn remove_favourite(&self, _user: &UserId, _key: &str) -> Result<(), StoreError> {
        Err(self.error())
    }
}

/// Opens the SQLite store at `path`, falling back to an [`UnavailableStore`]
/// if the database cannot be opened.
pub(crate) fn open(path: &str) -> Box<dyn FavouritesStore + Send> {
    match sqlite::SqliteStore::open(path) {
        Ok(store) => {
            tracing::info!(path, "favourites store opened");
            Box::new(store)
        }
        Err(e) => {
            tracing::error!(path, error = %e, "failed to open favourites store");
            Box::new(UnavailableStore::new(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_store_fails_every_request() {
        let store = UnavailableStore::new("offline");
        let user = UserId::new("u1");
        let record = FavouriteRecord::new("/works/OL1W", "Dune");

        assert!(matches!(
            store.fetch_favourites(&user),
            Err(StoreError::Unavailable(reason)) if reason == "offline"
        ));
        assert!(store.is_favourite(&user, &record.key).is_err());
        assert!(store.add_favourite(&user, &record).is_err());
        assert!(store.remove_favourite(&user, &record.key).is_err());
    }
}
