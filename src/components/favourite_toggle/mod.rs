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

//! Per-record favourite toggle control.
//!
//! A toggle asks the task worker to flip one record's favourited status and
//! reports a successful flip to its [`FavouriteChangeDelegate`]. It keeps a
//! local belief about the record's status for display only; the owner of the
//! delegate re-derives the truth from the store.

mod render;

use std::sync::mpsc::Sender;

use crate::{
    diagnostics::{Diagnostics, SyncError},
    model::{FavouriteRecord, UserId},
    store::StoreError,
    tasks::AppTask,
};

pub(crate) const TOGGLE_ERROR_MESSAGE: &str = "Could not update favourite";

/// Notified after a favourite mutation has been applied by the store.
pub(crate) trait FavouriteChangeDelegate {
    fn on_favourite_changed(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ToggleStatus {
    Idle,
    Pending,
    Failed(String),
}

#[derive(Debug)]
pub(crate) struct FavouriteToggle {
    favourited: bool,
    status: ToggleStatus,
}

impl Default for FavouriteToggle {
    // Toggles are only created for records listed as favourites.
    fn default() -> Self {
        Self {
            favourited: true,
            status: ToggleStatus::Idle,
        }
    }
}

impl FavouriteToggle {
    pub(crate) fn status(&self) -> &ToggleStatus {
        &self.status
    }

    pub(crate) fn is_favourited(&self) -> bool {
        self.favourited
    }

    pub(crate) fn is_idle(&self) -> bool {
        self.status == ToggleStatus::Idle
    }

    /// Requests exactly one store mutation for `record`.
    ///
    /// The worker decides between add and remove from the store's current
    /// view, so a repeated toggle issued before the first completes is still
    /// a complete operation rather than a delta.
    pub(crate) fn toggle(
        &mut self,
        record: &FavouriteRecord,
        user: &UserId,
        task_tx: &Sender<AppTask>,
        diagnostics: &dyn Diagnostics,
    ) {
        let task = AppTask::ToggleFavourite {
            user: user.clone(),
            record: record.clone(),
        };

        match task_tx.send(task) {
            Ok(()) => self.status = ToggleStatus::Pending,
            Err(e) => {
                self.status = ToggleStatus::Failed(TOGGLE_ERROR_MESSAGE.to_string());
                diagnostics.report(&SyncError::Write {
                    user: user.clone(),
                    key: record.key.clone(),
                    source: StoreError::Unavailable(e.to_string()),
                });
            }
        }
    }

    /// Applies the outcome of a toggle request.
    ///
    /// Only a successful mutation notifies the delegate; a failure is shown
    /// on this control and reported to diagnostics.
    pub(crate) fn complete(
        &mut self,
        user: UserId,
        key: String,
        result: Result<bool, StoreError>,
        delegate: &mut dyn FavouriteChangeDelegate,
        diagnostics: &dyn Diagnostics,
    ) {
        match result {
            Ok(favourited) => {
                self.favourited = favourited;
                self.status = ToggleStatus::Idle;
                delegate.on_favourite_changed();
            }
            Err(source) => {
                self.status = ToggleStatus::Failed(TOGGLE_ERROR_MESSAGE.to_string());
                diagnostics.report(&SyncError::Write { user, key, source });
            }
        }
    }
}
