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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application: the signed-in
//! user's identity, the favourited book records held by the store, and the
//! view state derived from loading them.

mod view_state;

pub(crate) use view_state::{LOAD_ERROR_MESSAGE, RequestToken, ViewState};

use std::fmt;

use chrono::{DateTime, Utc};

const COVER_URL_PREFIX: &str = "https://covers.openlibrary.org/b/id";
const BOOK_PATH_PREFIX: &str = "/bookfoo/book";
const WORKS_PREFIX: &str = "/works/";

pub(crate) const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Opaque identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct UserId(String);

impl UserId {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A book the user has marked as a favourite.
///
/// `key` is unique within one user's collection and is the identity used for
/// list rendering and for store mutations.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FavouriteRecord {
    pub(crate) key: String,
    pub(crate) title: String,
    pub(crate) author_name: Option<String>,
    pub(crate) cover_i: Option<i64>,
    pub(crate) timestamp: Option<DateTime<Utc>>,
}

impl FavouriteRecord {
    pub(crate) fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            author_name: None,
            cover_i: None,
            timestamp: None,
        }
    }

    pub(crate) fn author_display(&self) -> &str {
        self.author_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_AUTHOR)
    }

    /// Medium-sized cover artwork URL, or `None` when the book has no cover.
    pub(crate) fn cover_url(&self) -> Option<String> {
        self.cover_i
            .map(|id| format!("{}/{}-M.jpg", COVER_URL_PREFIX, id))
    }

    /// Path of the book's detail page, derived from the work key.
    pub(crate) fn book_path(&self) -> String {
        let id = self.key.strip_prefix(WORKS_PREFIX).unwrap_or(&self.key);
        format!("{}/{}", BOOK_PATH_PREFIX, id)
    }
}
