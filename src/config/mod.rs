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

//! Application configuration.
//!
//! This module manages the application configuration file. The file lives in
//! the platform configuration directory and is created with default values on
//! first run.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

pub(crate) const CONFIG_NAME: &str = "bookfoo";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,

    /// Identity signed in at startup, if any.
    pub user: Option<String>,

    pub database_file: String,

    /// Wait between a favourite mutation and the reload that follows it.
    pub settle_delay_ms: u64,

    /// Default log filter, `RUST_LOG` takes precedence.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            user: None,
            database_file: "favourites.db".to_string(),
            settle_delay_ms: 100,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub(crate) fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Database location. Relative paths are resolved against the
    /// configuration directory.
    pub(crate) fn database_path(&self) -> String {
        let path = Path::new(&self.database_file);
        if path.is_absolute() {
            return self.database_file.clone();
        }

        match config_dir() {
            Some(dir) => dir.join(path).to_string_lossy().into_owned(),
            None => self.database_file.clone(),
        }
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

pub fn save_config(cfg: &AppConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}

/// Directory holding the configuration file, used as the root for logs.
pub(crate) fn config_dir() -> Option<PathBuf> {
    confy::get_configuration_file_path(CONFIG_NAME, None)
        .ok()
        .and_then(|path| path.parent().map(PathBuf::from))
}
