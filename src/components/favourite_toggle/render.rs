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

//! Visual indicator for a favourite toggle.

use ratatui::{style::Style, text::Span};

use crate::{
    components::favourite_toggle::{FavouriteToggle, ToggleStatus},
    theme::Theme,
};

impl FavouriteToggle {
    pub(crate) fn indicator(&self, theme: &Theme) -> Span<'static> {
        match (&self.status, self.favourited) {
            (ToggleStatus::Pending, _) => {
                Span::styled("[…]", Style::default().fg(theme.muted_fg))
            }
            (ToggleStatus::Failed(message), _) => Span::styled(
                format!("[!] {}", message),
                Style::default().fg(theme.error_fg),
            ),
            (ToggleStatus::Idle, true) => {
                Span::styled("[♥]", Style::default().fg(theme.accent_colour))
            }
            (ToggleStatus::Idle, false) => {
                Span::styled("[♡]", Style::default().fg(theme.muted_fg))
            }
        }
    }
}
