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

//! UI rendering logic for the favourites view.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    prelude::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
};

use crate::{
    components::{FavouriteToggle, FavouritesView},
    model::{FavouriteRecord, ViewState},
    theme::Theme,
    util::format::format_added_date,
};

pub(crate) const LOADING_TEXT: &str = "Loading your favorites...";
pub(crate) const EMPTY_TEXT: &str = "You haven't added any books to your favorites yet.";
pub(crate) const BROWSE_TEXT: &str = "Browse books to add some: /bookfoo";
pub(crate) const NO_COVER_TEXT: &str = "No Cover";

impl FavouritesView {
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        let header_block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::horizontal(1));

        let header_text = match self.identity() {
            Some(user) => format!("My Favorites ({})", user),
            None => "My Favorites".to_string(),
        };

        let header = Paragraph::new(header_text)
            .style(Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD))
            .block(header_block);
        f.render_widget(header, chunks[0]);

        match &self.state {
            ViewState::Loading => draw_message(f, chunks[1], vec![muted(LOADING_TEXT, theme)]),
            ViewState::Unauthenticated => draw_message(
                f,
                chunks[1],
                vec![error(&crate::diagnostics::SyncError::AuthAbsent.to_string(), theme)],
            ),
            ViewState::LoadError(message) => draw_message(f, chunks[1], vec![error(message, theme)]),
            ViewState::Loaded(items) if items.is_empty() => draw_message(
                f,
                chunks[1],
                vec![
                    muted(EMPTY_TEXT, theme),
                    Line::from(""),
                    Line::from(BROWSE_TEXT).style(
                        Style::default()
                            .fg(theme.link_fg)
                            .add_modifier(Modifier::UNDERLINED),
                    ),
                ],
            ),
            ViewState::Loaded(items) => {
                let list_items: Vec<ListItem> = items
                    .iter()
                    .map(|record| item_lines(record, self.toggles.get(&record.key), theme))
                    .map(ListItem::new)
                    .collect();

                let list = List::new(list_items)
                    .block(Block::default().padding(Padding::horizontal(1)))
                    .highlight_style(Style::default().bg(theme.selection_bg));

                f.render_stateful_widget(list, chunks[1], &mut self.list_state);
            }
        }
    }
}

/// The lines describing one favourite: title with its toggle, author, cover,
/// optional date added, and the book's link.
pub(crate) fn item_lines(
    record: &FavouriteRecord,
    toggle: Option<&FavouriteToggle>,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let indicator = match toggle {
        Some(toggle) => toggle.indicator(theme),
        None => FavouriteToggle::default().indicator(theme),
    };

    let mut lines = vec![
        Line::from(vec![
            indicator,
            Span::raw(" "),
            Span::styled(
                record.title.clone(),
                Style::default().fg(theme.title_fg).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("    by {}", record.author_display()),
            Style::default().fg(theme.author_fg),
        )),
        Line::from(Span::styled(
            format!("    {}", record.cover_url().unwrap_or_else(|| NO_COVER_TEXT.to_string())),
            Style::default().fg(theme.muted_fg),
        )),
    ];

    if let Some(timestamp) = record.timestamp {
        lines.push(Line::from(Span::styled(
            format!("    Added: {}", format_added_date(timestamp)),
            Style::default().fg(theme.muted_fg),
        )));
    }

    lines.push(Line::from(Span::styled(
        format!("    {}", record.book_path()),
        Style::default().fg(theme.link_fg),
    )));
    lines.push(Line::from(""));

    lines
}

fn draw_message(f: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let height = lines.len() as u16;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rows[1]);
}

fn muted(text: &str, theme: &Theme) -> Line<'static> {
    Line::from(text.to_string()).style(Style::default().fg(theme.muted_fg))
}

fn error(text: &str, theme: &Theme) -> Line<'static> {
    Line::from(text.to_string()).style(Style::default().fg(theme.error_fg))
}
