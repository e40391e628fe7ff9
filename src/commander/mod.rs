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

//! Command-line input logic and state management.
//!
//! This module implements a command-line component: pressing `:` opens it,
//! keys are fed to a text input, and submitting the text parses it into a
//! [`Command`] which is dispatched as the corresponding application event.
//!
//! # Commands
//!
//! * `q`, `quit`: exit.
//! * `login <user>`, `logout`: change the signed-in identity.
//! * `r`, `retry`: reload the favourites list.
//! * `add <key> <title...>`: add a book to the favourites.
//! * `1`, `fav`, `2`, `help`: switch the main view.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{
    MainView,
    events::AppEvent,
    model::{FavouriteRecord, UserId},
};

const WORK_KEY_PREFIX: &str = "/works/";

#[derive(Debug, PartialEq)]
pub(crate) enum Command {
    Quit,
    Login(String),
    Logout,
    Retry,
    Add { key: String, title: String },
    View(MainView),
}

/// Parses a submitted command line.
///
/// Bare work identifiers such as `OL45804W` are expanded to full work keys.
pub(crate) fn parse_command(buffer: &str) -> Result<Command, String> {
    let parts: Vec<&str> = buffer.split_whitespace().collect();

    match parts.as_slice() {
        ["q"] | ["quit"] => Ok(Command::Quit),

        ["login", user] => Ok(Command::Login(user.to_string())),
        ["login", ..] => Err("Usage: login <user>".to_string()),
        ["logout"] => Ok(Command::Logout),

        ["r"] | ["retry"] => Ok(Command::Retry),

        ["add", key, title_parts @ ..] if !title_parts.is_empty() => {
            let key = if key.starts_with('/') {
                key.to_string()
            } else {
                format!("{}{}", WORK_KEY_PREFIX, key)
            };

            Ok(Command::Add {
                key,
                title: title_parts.join(" "),
            })
        }
        ["add", ..] => Err("Usage: add <key> <title>".to_string()),

        ["1"] | ["fav"] => Ok(Command::View(MainView::Favourites)),
        ["2"] | ["help"] => Ok(Command::View(MainView::Help)),

        [] => Err(String::new()),

        [cmd, ..] => Err(format!("Unknown command: {}", cmd)),
    }
}

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Handles a terminal event, returning true if it was consumed.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> bool {
        let Event::Key(key_event) = event else {
            return false;
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return true;
            }
            return false;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.input.reset();
                self.active = false;
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                self.input.reset();
                self.active = false;

                if let Err(e) = self.run_command(&buffer, event_tx) {
                    tracing::warn!(error = %e, "command could not be dispatched");
                }
            }

            _ => {
                // Delegate all other key events to the managed input component.
                self.input.handle_event(event);
            }
        }

        true
    }

    fn run_command(&self, buffer: &str, event_tx: &Sender<AppEvent>) -> Result<()> {
        let event = match parse_command(buffer) {
            Ok(Command::Quit) => AppEvent::ExitApplication,
            Ok(Command::Login(user)) => AppEvent::SignIn(UserId::new(user)),
            Ok(Command::Logout) => AppEvent::SignOut,
            Ok(Command::Retry) => AppEvent::RetryFavourites,
            Ok(Command::Add { key, title }) => AppEvent::AddFavourite(FavouriteRecord::new(key, title)),
            Ok(Command::View(view)) => AppEvent::SetMainView(view),
            Err(message) if message.is_empty() => return Ok(()),
            Err(message) => AppEvent::Error(message),
        };

        event_tx.send(event)?;
        Ok(())
    }
}
