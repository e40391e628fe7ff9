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

//! Input handling for the favourites view.
//!
//! This module maps raw terminal keyboard events to list navigation, favourite
//! toggling, and reload requests.

use crossterm::event::{Event, KeyCode};

use crate::components::FavouritesView;

impl FavouritesView {
    /// Handles a terminal event, returning true if it was consumed.
    pub(crate) fn process_event(&mut self, event: &Event) -> bool {
        if !self.is_active {
            return false;
        }

        let Event::Key(key_event) = event else {
            return false;
        };

        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => self.goto_next(),
            KeyCode::Char('k') | KeyCode::Up => self.goto_previous(),
            KeyCode::Char('g') => self.goto_first(),
            KeyCode::Char('G') => self.goto_last(),

            KeyCode::Char('x') | KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),

            KeyCode::Char('r') => self.retry(),

            _ => return false,
        }

        true
    }

    fn goto_next(&mut self) {
        let len = self.state().items().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => if i >= len - 1 { 0 } else { i + 1 },
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn goto_previous(&mut self) {
        let len = self.state().items().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => if i == 0 { len - 1 } else { i - 1 },
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn goto_first(&mut self) {
        if !self.state().items().is_empty() {
            self.list_state.select(Some(0));
        }
    }

    fn goto_last(&mut self) {
        let len = self.state().items().len();
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
    }
}
