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

//! # Bookfoo favourites TUI.
//!
//! A terminal view of the signed-in user's favourite books.
//!
//! This application coordinates a TUI frontend built with `ratatui` and a
//! background processing layer.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, owns all UI state and
//!   renders it.
//! * A **Background Worker** owns the favourites store and runs reads and
//!   writes via asynchronous task processing.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and background workers is handled via `std::sync::mpsc`
//! channels.

mod auth;
mod commander;
mod components;
mod config;
mod diagnostics;
mod events;
mod logging;
mod model;
mod render;
mod store;
mod tasks;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};

use crate::{
    auth::{AuthProvider, Session},
    commander::Commander,
    components::FavouritesView,
    config::AppConfig,
    diagnostics::TracingDiagnostics,
    events::{AppEvent, process_events},
    model::UserId,
    tasks::AppTask,
    theme::Theme,
};

const TICK_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainView {
    Favourites,
    Help,
}

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,
    pub main_view: MainView,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub task_tx: Sender<AppTask>,

    pub session: Session,

    pub favourites_view: FavouritesView,

    pub commander: Commander,

    /// Last message shown on the status line.
    pub status: Option<String>,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, task_tx: Sender<AppTask>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let user = config
            .user
            .as_deref()
            .map(str::trim)
            .filter(|user| !user.is_empty())
            .map(UserId::new);

        let favourites_view = FavouritesView::new(
            task_tx.clone(),
            event_tx.clone(),
            config.settle_delay(),
            Box::new(TracingDiagnostics),
        );

        Self {
            theme: Theme::default(),
            main_view: MainView::Favourites,
            session: Session::new(user, event_tx.clone()),
            event_tx,
            event_rx,
            task_tx,
            favourites_view,
            commander: Commander::new(),
            status: None,
            config,
        }
    }

    /// Mounts the initial view for whoever is signed in.
    pub fn start(&mut self) {
        self.main_view = MainView::Favourites;
        self.favourites_view.is_active = true;
        self.favourites_view.initialize(self.session.current_user());
    }
}

/// The entry point of the application.
///
/// Sets up the communication channels, initializes the application state,
/// manages the terminal lifecycle, and returns an error if any part of the
/// execution fails.
fn main() -> Result<()> {
    let config = config::load_config();

    logging::init(&config.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "bookfoo starting");

    let (task_tx, task_rx) = mpsc::channel();

    let mut app = App::new(config, task_tx);

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, task_rx);
    restore_terminal(&mut terminal);

    if let Err(e) = config::save_config(&app.config) {
        tracing::warn!(error = %e, "failed to save configuration");
    }

    if let Err(e) = &res {
        tracing::error!(error = ?e, "application error");
    }
    tracing::info!("bookfoo exited");

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    if let Err(e) = util::term::set_background(&mut io::stdout(), app.theme.background_colour) {
        tracing::warn!(error = %e, "failed to set terminal background");
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// This function is "best-effort" and does not return a result, as it is
/// typically called during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_background(&mut io::stdout()).ok();
    terminal.show_cursor().ok();
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A task worker owning the favourites store.
/// * An input thread to poll for system keyboard events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// After spawning the workers and mounting the favourites view, it hands
/// control to [`process_events`] to manage the UI and state updates.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    task_rx: Receiver<AppTask>,
) -> Result<()> {
    // The worker owns the store; a database that fails to open degrades to a
    // store that fails every request.
    let store = store::open(&app.config.database_path());
    tasks::spawn_task_worker(store, task_rx, app.event_tx.clone());

    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event::Event::Key(key)) => {
                    if tx_keys.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(error = %e, "failed to read terminal event");
                    break;
                }
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    app.start();
    terminal.draw(|f| render::draw(f, app))?;

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
