// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Guess buttons and transport display.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::session::{FeedbackKind, Phase};
use crate::timeline::SectionType;

use super::{section_color, QuizView};

/// Row of four guess buttons
pub struct GuessPadWidget<'a> {
    view: &'a QuizView,
}

impl<'a> GuessPadWidget<'a> {
    /// Create a new guess pad
    pub fn new(view: &'a QuizView) -> Self {
        Self { view }
    }
}

impl Widget for GuessPadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);

        let enabled = self.view.phase == Phase::Playing;
        let pulse = self.view.feedback.map(|f| f.kind);

        for kind in SectionType::ALL {
            let color = section_color(kind);
            let (border, marker) = match pulse {
                Some(FeedbackKind::Incorrect(t)) if t == kind => (Color::LightRed, " ✗"),
                Some(FeedbackKind::Correct(t)) if t == kind => (Color::LightGreen, " ✓"),
                _ if enabled => (color, ""),
                _ => (Color::DarkGray, ""),
            };
            let text_style = if enabled {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(format!(" {} ", kind.slot() + 1));

            let lines = vec![
                Line::from(Span::styled(format!("{}{}", kind.label(), marker), text_style)),
                Line::from(Span::styled(
                    kind.description(),
                    Style::default().fg(Color::Gray),
                )),
            ];

            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block)
                .render(chunks[kind.slot()], buf);
        }
    }
}

/// Transport indicator text and style for a phase
pub fn transport_indicator(phase: Phase) -> (&'static str, Style) {
    match phase {
        Phase::Loading => ("… LOADING", Style::default().fg(Color::Cyan)),
        Phase::Ready => ("■ READY", Style::default().fg(Color::Yellow)),
        Phase::Playing => (
            "▶ PLAY",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Phase::Paused => ("❚❚ PAUSED", Style::default().fg(Color::Yellow)),
        Phase::Finished => (
            "✓ FINISHED",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Phase::Failed => (
            "! FAILED",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    }
}

/// Transport widget for displaying playback state
pub struct TransportWidget<'a> {
    view: &'a QuizView,
    block: Option<Block<'a>>,
}

impl<'a> TransportWidget<'a> {
    /// Create a new transport widget
    pub fn new(view: &'a QuizView) -> Self {
        Self { view, block: None }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for TransportWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(12), // Phase indicator
                Constraint::Length(2),  // Spacer
                Constraint::Length(16), // Guesses
                Constraint::Length(2),  // Spacer
                Constraint::Min(0),     // Key hints
            ])
            .split(area);

        let (indicator, style) = transport_indicator(self.view.phase);
        Paragraph::new(indicator).style(style).render(chunks[0], buf);

        let guesses = format!(
            "{}/{} labelled",
            self.view.state.ledger.len(),
            self.view.timeline.len()
        );
        Paragraph::new(guesses)
            .style(Style::default().fg(Color::Cyan))
            .render(chunks[2], buf);

        let hints = match self.view.phase {
            Phase::Failed => "l: reload",
            Phase::Finished => "r: try again",
            _ => "Space: play/pause  r: restart  f: finish",
        };
        Paragraph::new(hints)
            .style(Style::default().fg(Color::DarkGray))
            .render(chunks[4], buf);
    }
}
