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

//! Terminal background control via OSC escape sequences.
//!
//! OSC 11 sets the emulator's background and OSC 111 restores the user's own.
//! Terminals that do not understand them ignore the sequences.

use std::io::{self, Write};

use ratatui::style::Color;

use crate::theme::Theme;

/// Paints the whole terminal window with `colour`.
///
/// Colours without an RGB value are left to the terminal and nothing is
/// written.
pub(crate) fn set_background(out: &mut impl Write, colour: Color) -> io::Result<()> {
    let Some(hex) = Theme::to_hex(colour) else {
        return Ok(());
    };

    write!(out, "\x1b]11;{}\x07", hex)?;
    out.flush()
}

/// Hands the background back to the terminal's configured colour.
pub(crate) fn reset_background(out: &mut impl Write) -> io::Result<()> {
    out.write_all(b"\x1b]111\x07")?;
    out.flush()
}
