// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Results overlay shown when a session finishes.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::score::{ScoreSummary, MAX_STARS};

/// Star row such as `★★★☆☆`
pub fn star_row(stars: u8) -> String {
    (0..MAX_STARS)
        .map(|i| if i < stars { '★' } else { '☆' })
        .collect()
}

/// Results panel
pub struct ResultsWidget<'a> {
    summary: ScoreSummary,
    notes: &'a [String],
}

impl<'a> ResultsWidget<'a> {
    /// Create a results panel
    pub fn new(summary: ScoreSummary, notes: &'a [String]) -> Self {
        Self { summary, notes }
    }
}

impl Widget for ResultsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Mission Over ")
            .style(Style::default().bg(Color::Black));
        let inner = block.inner(area);
        block.render(area, buf);

        let s = self.summary;
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                star_row(s.stars),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Correct  ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{}/{}", s.correct, s.total),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled("    Wrong  ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{}", s.incorrect),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        for note in self.notes {
            lines.push(Line::from(Span::styled(
                note.as_str(),
                Style::default().fg(Color::Gray),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "r: try again   Esc: close   q: quit",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_row() {
        assert_eq!(star_row(3), "★★★☆☆");
        assert_eq!(star_row(1), "★☆☆☆☆");
        assert_eq!(star_row(5), "★★★★★");
    }
}
