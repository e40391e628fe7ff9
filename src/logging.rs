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

//! Logging setup.
//!
//! Log records go to `logs/bookfoo.log` beside the configuration file, written
//! by a non-blocking background writer so logging never stalls the UI thread.
//! `RUST_LOG` overrides the configured level. If the log file cannot be
//! opened, records fall back to stderr.

use std::{fmt, fs, io, path::PathBuf, sync::OnceLock};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter,
    fmt::{format::Writer, time::FormatTime},
};

use crate::config;

const LOG_FILE_NAME: &str = "bookfoo.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log_file() -> io::Result<(PathBuf, fs::File)> {
    let mut path = config::config_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no configuration directory"))?;
    path.push("logs");
    fs::create_dir_all(&path)?;
    path.push(LOG_FILE_NAME);

    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

/// Installs the global tracing subscriber. Call once, before the terminal is
/// set up.
pub(crate) fn init(default_level: &str) {
    match open_log_file() {
        Ok((path, file)) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(default_level))
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(LocalTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(default_level))
                .with_target(false)
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_timer(LocalTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}
