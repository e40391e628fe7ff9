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

//! Application events and the main event loop.
//!
//! Everything that changes application state arrives on the main thread as an
//! [`AppEvent`]: key presses, periodic ticks, identity changes, task results
//! from the background worker, and scheduled reloads. Events are processed one
//! at a time and the UI is redrawn after each one, so no component is ever
//! touched from more than one thread.

mod handlers;
mod key_handlers;

use handlers::*;
use key_handlers::*;

use std::io::Stdout;

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App, MainView,
    model::{FavouriteRecord, RequestToken, UserId},
    render::draw,
    store::StoreError,
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    Tick,

    /// The signed-in identity changed, `None` after signing out.
    IdentityChanged(Option<UserId>),

    FavouritesLoaded {
        token: RequestToken,
        user: UserId,
        result: Result<Vec<FavouriteRecord>, StoreError>,
    },

    /// Outcome of a toggle, `Ok(true)` when the record is now a favourite.
    FavouriteToggled {
        user: UserId,
        key: String,
        result: Result<bool, StoreError>,
    },

    FavouriteAdded {
        user: UserId,
        key: String,
        result: Result<(), StoreError>,
    },

    /// A settling delay elapsed for the scheduled reload with this id.
    FavouritesReloadDue(u64),

    SetMainView(MainView),

    SignIn(UserId),
    SignOut,

    RetryFavourites,
    AddFavourite(FavouriteRecord),

    ExitApplication,

    Error(String),
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        process_event(app, event)?;

        terminal.draw(|f| draw(f, app))?;
    }

    app.favourites_view.teardown();
    Ok(())
}

/// Applies a single event to the application state.
pub(crate) fn process_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => process_key_event(app, key)?,
        AppEvent::IdentityChanged(user) => handle_identity_changed(app, user),
        AppEvent::FavouritesLoaded { token, result, .. } => {
            handle_favourites_loaded(app, token, result)
        }
        AppEvent::FavouriteToggled { user, key, result } => {
            handle_favourite_toggled(app, user, key, result)
        }
        AppEvent::FavouriteAdded { user, key, result } => {
            handle_favourite_added(app, user, key, result)
        }
        AppEvent::FavouritesReloadDue(id) => app.favourites_view.handle_reload_due(id),
        AppEvent::SetMainView(view) => handle_set_main_view(app, view),
        AppEvent::SignIn(user) => app.session.sign_in(user)?,
        AppEvent::SignOut => app.session.sign_out()?,
        AppEvent::RetryFavourites => app.favourites_view.retry(),
        AppEvent::AddFavourite(record) => handle_add_favourite(app, record),
        AppEvent::Error(message) => handle_error(app, message),
        AppEvent::ExitApplication | AppEvent::Tick => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::{config::AppConfig, model::ViewState, tasks::AppTask};

    fn app() -> (App, mpsc::Receiver<AppTask>) {
        let (task_tx, task_rx) = mpsc::channel();
        let config = AppConfig {
            user: Some("u1".into()),
            ..AppConfig::default()
        };
        let mut app = App::new(config, task_tx);
        app.start();
        (app, task_rx)
    }

    fn drain(app: &mut App) {
        while let Ok(event) = app.event_rx.try_recv() {
            process_event(app, event).unwrap();
        }
    }

    #[test]
    fn startup_loads_configured_user() {
        let (app, task_rx) = app();

        assert!(app.favourites_view.state().is_loading());
        assert!(matches!(
            task_rx.try_recv(),
            Ok(AppTask::FetchFavourites { user, .. }) if user.as_str() == "u1"
        ));
    }

    #[test]
    fn help_view_tears_down_and_returning_reloads() {
        let (mut app, task_rx) = app();
        let _ = task_rx.try_recv();

        process_event(&mut app, AppEvent::SetMainView(MainView::Help)).unwrap();
        assert!(!app.favourites_view.is_mounted());

        process_event(&mut app, AppEvent::SetMainView(MainView::Favourites)).unwrap();
        assert!(app.favourites_view.is_mounted());
        assert!(matches!(task_rx.try_recv(), Ok(AppTask::FetchFavourites { .. })));
    }

    #[test]
    fn sign_out_leaves_view_unauthenticated() {
        let (mut app, _task_rx) = app();

        process_event(&mut app, AppEvent::SignOut).unwrap();
        drain(&mut app);

        assert_eq!(app.favourites_view.state(), &ViewState::Unauthenticated);
    }

    #[test]
    fn add_without_identity_reports_instead_of_sending() {
        let (mut app, task_rx) = app();
        let _ = task_rx.try_recv();
        process_event(&mut app, AppEvent::SignOut).unwrap();
        drain(&mut app);

        process_event(
            &mut app,
            AppEvent::AddFavourite(FavouriteRecord::new("/works/OL1W", "Dune")),
        )
        .unwrap();

        assert!(task_rx.try_recv().is_err());
        assert_eq!(
            app.status.as_deref(),
            Some("Please login to view your favorites")
        );
    }

    #[test]
    fn quit_key_requests_exit() {
        let (mut app, _task_rx) = app();

        process_event(
            &mut app,
            AppEvent::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
        )
        .unwrap();

        assert!(matches!(app.event_rx.try_recv(), Ok(AppEvent::ExitApplication)));
    }
}
