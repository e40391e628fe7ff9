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

//! Favourites synchronisation errors and the operator-facing sink they are
//! reported to.
//!
//! Every [`SyncError`] resolves to a renderable state in the UI; the detail
//! carried by the error only ever reaches the log.

use std::error::Error as _;

use thiserror::Error;

use crate::{model::UserId, store::StoreError};

#[derive(Debug, Error)]
pub(crate) enum SyncError {
    /// Nobody is signed in. A valid state rather than a failure.
    #[error("Please login to view your favorites")]
    AuthAbsent,

    #[error("failed to read favourites for user '{user}'")]
    Read {
        user: UserId,
        #[source]
        source: StoreError,
    },

    #[error("failed to update favourite '{key}' for user '{user}'")]
    Write {
        user: UserId,
        key: String,
        #[source]
        source: StoreError,
    },
}

/// Receives failure details for operator-facing logging.
pub(crate) trait Diagnostics {
    fn report(&self, error: &SyncError);
}

/// Forwards failures to the `tracing` log.
pub(crate) struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, error: &SyncError) {
        match error {
            SyncError::AuthAbsent => tracing::debug!("{}", error),
            _ => {
                let cause = error.source().map(ToString::to_string).unwrap_or_default();
                tracing::error!(cause = %cause, "{}", error);
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_keeps_store_detail_as_source() {
        let error = SyncError::Read {
            user: UserId::new("u1"),
            source: StoreError::Unavailable("connection refused".into()),
        };

        assert_eq!(error.to_string(), "failed to read favourites for user 'u1'");
        assert_eq!(
            error.source().map(ToString::to_string).as_deref(),
            Some("favourites store is unavailable: connection refused")
        );
    }
}
