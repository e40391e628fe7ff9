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

use anyhow::Result;
use chrono::Utc;

use crate::{
    events::AppEvent,
    model::{FavouriteRecord, RequestToken, UserId},
    store::{FavouritesStore, StoreError},
    tasks::TaskContext,
};

pub(super) fn fetch_favourites(ctx: &mut TaskContext, token: RequestToken, user: UserId) -> Result<()> {
    let result = ctx.store.fetch_favourites(&user);
    tracing::debug!(%user, ?token, ok = result.is_ok(), "fetched favourites");

    ctx.event_tx
        .send(AppEvent::FavouritesLoaded { token, user, result })?;

    Ok(())
}

pub(super) fn toggle_favourite(ctx: &mut TaskContext, user: UserId, record: FavouriteRecord) -> Result<()> {
    let key = record.key.clone();
    let result = toggle(ctx.store, &user, record);
    tracing::debug!(%user, key = %key, ?result, "toggled favourite");

    ctx.event_tx
        .send(AppEvent::FavouriteToggled { user, key, result })?;

    Ok(())
}

pub(super) fn add_favourite(ctx: &mut TaskContext, user: UserId, record: FavouriteRecord) -> Result<()> {
    let key = record.key.clone();
    let record = stamped(record);
    let result = ctx.store.add_favourite(&user, &record);
    tracing::debug!(%user, key = %key, ok = result.is_ok(), "added favourite");

    ctx.event_tx
        .send(AppEvent::FavouriteAdded { user, key, result })?;

    Ok(())
}

/// Issues the inverse of the record's current status and returns whether the
/// record is a favourite afterwards.
fn toggle(store: &dyn FavouritesStore, user: &UserId, record: FavouriteRecord) -> Result<bool, StoreError> {
    if store.is_favourite(user, &record.key)? {
        store.remove_favourite(user, &record.key)?;
        Ok(false)
    } else {
        store.add_favourite(user, &stamped(record))?;
        Ok(true)
    }
}

fn stamped(record: FavouriteRecord) -> FavouriteRecord {
    FavouriteRecord {
        timestamp: Some(Utc::now()),
        ..record
    }
}
