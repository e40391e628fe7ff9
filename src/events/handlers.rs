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

use crate::{
    App, MainView,
    auth::AuthProvider,
    diagnostics::SyncError,
    model::{FavouriteRecord, RequestToken, UserId},
    store::StoreError,
    tasks::AppTask,
};

pub(super) fn handle_identity_changed(app: &mut App, user: Option<UserId>) {
    app.config.user = user.as_ref().map(|u| u.as_str().to_string());
    app.status = None;

    // An unmounted view picks the identity up when it is shown again.
    if app.main_view == MainView::Favourites {
        app.favourites_view.initialize(user);
    }
}

pub(super) fn handle_favourites_loaded(
    app: &mut App,
    token: RequestToken,
    result: Result<Vec<FavouriteRecord>, StoreError>,
) {
    app.favourites_view.complete_load(token, result);
}

pub(super) fn handle_favourite_toggled(
    app: &mut App,
    user: UserId,
    key: String,
    result: Result<bool, StoreError>,
) {
    app.favourites_view.complete_toggle(user, key, result);
}

pub(super) fn handle_favourite_added(
    app: &mut App,
    user: UserId,
    key: String,
    result: Result<(), StoreError>,
) {
    app.status = match app.favourites_view.complete_add(user, key.clone(), result) {
        Ok(()) => Some(format!("Added {} to favourites", key)),
        Err(e) => Some(e.to_string()),
    };
}

pub(super) fn handle_set_main_view(app: &mut App, main_view: MainView) {
    match main_view {
        MainView::Favourites => {
            app.favourites_view.is_active = true;
            app.favourites_view.initialize(app.session.current_user());
        }
        MainView::Help => {
            app.favourites_view.is_active = false;
            app.favourites_view.teardown();
        }
    }

    app.main_view = main_view;
}

pub(super) fn handle_add_favourite(app: &mut App, record: FavouriteRecord) {
    let Some(user) = app.session.current_user() else {
        app.status = Some(SyncError::AuthAbsent.to_string());
        return;
    };

    let key = record.key.clone();
    if app.task_tx.send(AppTask::AddFavourite { user, record }).is_err() {
        tracing::warn!(key = %key, "task worker unavailable, favourite not added");
        app.status = Some(format!("Could not add {}", key));
    }
}

pub(super) fn handle_error(app: &mut App, message: String) {
    tracing::error!(%message, "application error");
    app.status = Some(message);
}

