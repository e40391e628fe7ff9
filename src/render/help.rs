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

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::theme::Theme;

const KEYS: &[(&str, &str)] = &[
    ("j / Down", "next favourite"),
    ("k / Up", "previous favourite"),
    ("g / G", "first / last favourite"),
    ("x / Space / Enter", "toggle favourite"),
    ("r", "reload favourites"),
    ("1", "favourites"),
    ("2 / ?", "this help"),
    (":", "open the command line"),
    ("q", "quit"),
];

const COMMANDS: &[(&str, &str)] = &[
    ("login <user>", "sign in"),
    ("logout", "sign out"),
    ("add <key> <title>", "add a book to your favourites"),
    ("retry", "reload favourites"),
    ("q", "quit"),
];

pub(crate) fn draw_help(f: &mut Frame, area: Rect, theme: &Theme) {
    let mut lines = section("Keys", KEYS, theme);
    lines.push(Line::from(""));
    lines.extend(section("Commands", COMMANDS, theme));

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_colour))
        .padding(Padding::uniform(1));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn section(title: &'static str, entries: &[(&'static str, &'static str)], theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        title,
        Style::default()
            .fg(theme.accent_colour)
            .add_modifier(Modifier::BOLD),
    ))];

    lines.extend(entries.iter().map(|(key, action)| {
        Line::from(vec![
            Span::styled(format!("  {:<20}", key), Style::default().fg(theme.title_fg)),
            Span::styled(*action, Style::default().fg(theme.muted_fg)),
        ])
    }));

    lines
}
