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

//! View state derived from favourites load outcomes.

use crate::model::FavouriteRecord;

/// Shown in place of the raw failure whenever a load fails.
pub(crate) const LOAD_ERROR_MESSAGE: &str = "Failed to load favorites. Please try again later.";

/// The mutually exclusive rendering modes of the favourites view.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ViewState {
    Loading,
    Unauthenticated,
    LoadError(String),

    /// An empty list is a valid result, not an error.
    Loaded(Vec<FavouriteRecord>),
}

impl ViewState {
    pub(crate) fn items(&self) -> &[FavouriteRecord] {
        match self {
            ViewState::Loaded(items) => items,
            _ => &[],
        }
    }

    pub(crate) fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

/// Tags an issued load so that late responses from superseded loads can be
/// recognised and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct RequestToken(u64);

impl RequestToken {
    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_increase_monotonically() {
        let first = RequestToken::default().next();
        let second = first.next();
        assert!(second > first);
        assert_ne!(first, second);
    }

    #[test]
    fn only_loaded_state_exposes_items() {
        let record = FavouriteRecord::new("/works/OL1W", "Dune");
        assert_eq!(ViewState::Loaded(vec![record.clone()]).items(), &[record]);
        assert!(ViewState::Loading.items().is_empty());
        assert!(ViewState::LoadError(LOAD_ERROR_MESSAGE.into()).items().is_empty());
    }
}
