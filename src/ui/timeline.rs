// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Segmented timeline widget.
//!
//! Section labels stay hidden until guessed; a guessed section shows the
//! guess, coloured by correctness. The playhead runs underneath.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Widget},
};

use crate::timeline::{format_time, Timeline};

use super::{section_color, QuizView};

/// Column span of each section for a given width
///
/// Spans are proportional to clamped section length; rounding leftovers go
/// to the last section so the spans always cover `width` exactly.
pub fn section_columns(timeline: &Timeline, duration: f64, width: u16) -> Vec<(u16, u16)> {
    if duration <= 0.0 || timeline.is_empty() {
        return Vec::new();
    }

    let mut columns = Vec::with_capacity(timeline.len());
    let mut x = 0u16;
    for (i, section) in timeline.sections().iter().enumerate() {
        let end = timeline.effective_end(i, duration).unwrap_or(duration);
        let w = if i + 1 == timeline.len() {
            width.saturating_sub(x)
        } else {
            let edge = ((end / duration) * width as f64).round() as u16;
            let edge = edge.min(width).max(x);
            // Zero-length (clamped away) sections get no columns
            if section.start >= duration {
                0
            } else {
                edge - x
            }
        };
        columns.push((x, w));
        x = x.saturating_add(w);
    }
    columns
}

/// Playhead column for `time`
pub fn playhead_column(time: f64, duration: f64, width: u16) -> u16 {
    if duration <= 0.0 || width == 0 {
        return 0;
    }
    let fraction = (time / duration).clamp(0.0, 1.0);
    ((fraction * width as f64) as u16).min(width - 1)
}

/// Timeline widget
pub struct TimelineWidget<'a> {
    view: &'a QuizView,
    block: Option<Block<'a>>,
}

impl<'a> TimelineWidget<'a> {
    /// Create a new timeline widget
    pub fn new(view: &'a QuizView) -> Self {
        Self { view, block: None }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for TimelineWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };
        if area.height < 3 || area.width < 10 {
            return;
        }

        let view = self.view;
        let duration = view.state.duration;
        if duration <= 0.0 {
            buf.set_string(
                area.x,
                area.y + 1,
                "Loading audio...",
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        let bar_height = area.height.saturating_sub(2).max(1);
        let columns = section_columns(&view.timeline, duration, area.width);

        for (i, &(x, w)) in columns.iter().enumerate() {
            if w == 0 {
                continue;
            }
            let section = &view.timeline.sections()[i];
            let guess = view.state.ledger.guess_for(i);
            let is_current = view.current_section == Some(i);

            let (text, style) = match guess {
                Some(g) if g.is_correct => (
                    format!("{} ✓", g.guessed),
                    Style::default()
                        .fg(Color::Black)
                        .bg(section_color(section.kind))
                        .add_modifier(Modifier::BOLD),
                ),
                Some(g) => (
                    format!("{} ✗", g.guessed),
                    Style::default().fg(Color::LightRed).bg(Color::Rgb(90, 20, 20)),
                ),
                None => ("?".to_string(), Style::default().fg(Color::Gray).bg(Color::Rgb(40, 40, 48))),
            };
            let style = if is_current {
                style.add_modifier(Modifier::REVERSED)
            } else {
                style
            };

            for dy in 0..bar_height {
                for dx in 0..w {
                    // Thin separator between sections
                    let symbol = if dx + 1 == w && i + 1 < columns.len() { "│" } else { " " };
                    buf.set_string(area.x + x + dx, area.y + dy, symbol, style);
                }
            }

            let label_width = text.chars().count() as u16;
            if label_width <= w {
                let lx = area.x + x + (w - label_width) / 2;
                buf.set_string(lx, area.y + bar_height / 2, &text, style);
            }
        }

        // Playhead
        let px = playhead_column(view.state.current_time, duration, area.width);
        buf.set_string(
            area.x + px,
            area.y + bar_height,
            "▲",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        );

        // Times and progress dots
        let y = area.y + bar_height + 1;
        if y < area.y + area.height {
            let elapsed = format_time(view.state.current_time);
            let total = format_time(duration);
            let muted = Style::default().fg(Color::DarkGray);
            buf.set_string(area.x, y, &elapsed, muted);
            buf.set_string(
                area.x + area.width.saturating_sub(total.len() as u16),
                y,
                &total,
                muted,
            );

            let dots: String = (0..view.timeline.len())
                .map(|i| match view.state.ledger.guess_for(i) {
                    Some(g) if g.is_correct => '●',
                    _ => '·',
                })
                .collect();
            let dots_width = dots.chars().count() as u16;
            if dots_width + 12 < area.width {
                buf.set_string(
                    area.x + (area.width - dots_width) / 2,
                    y,
                    &dots,
                    Style::default().fg(Color::Cyan),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::{Section, SectionType};

    #[test]
    fn test_columns_cover_width() {
        let timeline = Timeline::rondo_alla_turca();
        for width in [20u16, 57, 80, 133] {
            let columns = section_columns(&timeline, 190.0, width);
            assert_eq!(columns.len(), 7);
            let total: u16 = columns.iter().map(|&(_, w)| w).sum();
            assert_eq!(total, width);
            for pair in columns.windows(2) {
                assert_eq!(pair[0].0 + pair[0].1, pair[1].0);
            }
        }
    }

    #[test]
    fn test_columns_are_proportional() {
        let timeline = Timeline::new(vec![
            Section::new(SectionType::A, 0.0, 25.0),
            Section::new(SectionType::B, 25.0, 50.0),
            Section::new(SectionType::Coda, 50.0, 300.0),
        ])
        .unwrap();
        let columns = section_columns(&timeline, 100.0, 100);
        assert_eq!(columns, vec![(0, 25), (25, 25), (50, 50)]);
    }

    #[test]
    fn test_columns_without_duration() {
        let timeline = Timeline::rondo_alla_turca();
        assert!(section_columns(&timeline, 0.0, 80).is_empty());
    }

    #[test]
    fn test_playhead_column() {
        assert_eq!(playhead_column(0.0, 100.0, 80), 0);
        assert_eq!(playhead_column(50.0, 100.0, 80), 40);
        assert_eq!(playhead_column(100.0, 100.0, 80), 79);
        assert_eq!(playhead_column(10.0, 0.0, 80), 0);
    }
}
