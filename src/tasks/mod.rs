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

//! Asynchronous application task processing.
//!
//! This module implements the command pattern used to offload store access
//! from the main UI thread. It provides a dedicated worker loop that
//! translates [`AppTask`] requests into favourites store operations and
//! broadcasts the results back to the application via [`AppEvent`]s.
//!
//! Only actions that may block, or may take more than a trivial amount of time
//! to process, should be implemented as tasks. Other actions are likely more
//! suited to events.

mod handlers;
pub(crate) mod schedule;

use handlers::*;

use std::{
    sync::mpsc::{Receiver, Sender},
    thread::{self, JoinHandle},
};

use anyhow::Result;

use crate::{
    events::AppEvent,
    model::{FavouriteRecord, RequestToken, UserId},
    store::FavouritesStore,
};

#[derive(Debug)]
pub(crate) enum AppTask {
    FetchFavourites {
        token: RequestToken,
        user: UserId,
    },

    /// Flip the favourited status of `record` as the store currently sees it.
    ToggleFavourite {
        user: UserId,
        record: FavouriteRecord,
    },

    AddFavourite {
        user: UserId,
        record: FavouriteRecord,
    },
}

/// Spawns a background thread to process application tasks.
///
/// The worker owns the store and enters a blocking loop, listening for
/// incoming [`AppTask`]s until the task channel is closed.
///
/// # Arguments
///
/// * `store` - The favourites store all tasks run against.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(
    store: Box<dyn FavouritesStore + Send>,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let mut ctx = TaskContext {
                event_tx: &event_tx,
                store: store.as_ref(),
            };

            if let Err(e) = handle_task(task, &mut ctx) {
                tracing::warn!(error = %e, "task result could not be delivered");
                let _ = event_tx.send(AppEvent::Error(e.to_string()));
            }
        }

        tracing::debug!("task worker finished");
    })
}

/// Bundles shared resources required by task handlers to simplify resource
/// passing when invoking those handler functions.
pub(crate) struct TaskContext<'a> {
    pub(crate) event_tx: &'a Sender<AppEvent>,
    pub(crate) store: &'a dyn FavouritesStore,
}

/// Orchestrates the execution of a single task.
///
/// Store failures are not errors here: they travel back to the UI inside the
/// result event. Only a failure to deliver that event is returned.
pub(crate) fn handle_task(task: AppTask, ctx: &mut TaskContext) -> Result<()> {
    match task {
        AppTask::FetchFavourites { token, user } => fetch_favourites(ctx, token, user),
        AppTask::ToggleFavourite { user, record } => toggle_favourite(ctx, user, record),
        AppTask::AddFavourite { user, record } => add_favourite(ctx, user, record),
    }
}
