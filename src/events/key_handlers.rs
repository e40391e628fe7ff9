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
use crossterm::event::{Event, KeyCode, KeyEvent};

use crate::{App, MainView, events::AppEvent};

/// Routes a key press to the first consumer that wants it.
///
/// The command line takes precedence while it is open, then the active view,
/// and finally the global bindings.
///
/// # Errors
///
/// Returns an error if an event cannot be posted back to the main loop.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let event = Event::Key(key);

    if app.commander.handle_event(&event, &app.event_tx) {
        return Ok(());
    }

    if app.favourites_view.process_event(&event) {
        return Ok(());
    }

    process_global_key_event(app, key)
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Char('1') => app
            .event_tx
            .send(AppEvent::SetMainView(MainView::Favourites))?,
        KeyCode::Char('2') | KeyCode::Char('?') => {
            app.event_tx.send(AppEvent::SetMainView(MainView::Help))?
        }

        KeyCode::Esc => app.status = None,

        _ => {}
    }

    Ok(())
}
