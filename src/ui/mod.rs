// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal UI for the RONDO quiz.
//!
//! Provides a ratatui-based terminal interface with the segmented timeline,
//! guess buttons, transport display, and tutorial/results/help overlays.
//! The event loop owns the session; widgets only see a [`QuizView`]
//! snapshot taken before each frame.

mod controls;
mod results;
mod timeline;

pub use controls::{transport_indicator, GuessPadWidget, TransportWidget};
pub use results::{star_row, ResultsWidget};
pub use timeline::{playhead_column, section_columns, TimelineWidget};

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::{PieceConfig, Settings};
use crate::media::MediaPlayer;
use crate::score::ScoreSummary;
use crate::session::{Feedback, FeedbackToken, Phase, Session, SessionError, SessionState};
use crate::timeline::{SectionType, Timeline};

/// Display colour of a section type
pub fn section_color(kind: SectionType) -> Color {
    match kind {
        SectionType::A => Color::Yellow,
        SectionType::B => Color::Rgb(255, 140, 0),
        SectionType::C => Color::Magenta,
        SectionType::Coda => Color::Red,
    }
}

/// Read-only snapshot of a session for rendering
#[derive(Debug, Clone)]
pub struct QuizView {
    pub phase: Phase,
    pub state: SessionState,
    pub timeline: Timeline,
    pub current_section: Option<usize>,
    pub feedback: Option<Feedback>,
    pub summary: ScoreSummary,
    pub error: Option<SessionError>,
}

impl QuizView {
    /// Snapshot a session
    pub fn capture<P: MediaPlayer>(session: &Session<P>) -> Self {
        Self {
            phase: session.phase(),
            state: session.state().clone(),
            timeline: session.timeline().clone(),
            current_section: session.current_section(),
            feedback: session.feedback(),
            summary: session.summary(),
            error: session.last_error().cloned(),
        }
    }
}

/// UI-only state
#[derive(Debug, Clone)]
pub struct UiState {
    /// Tutorial overlay visible
    pub show_tutorial: bool,
    /// Help overlay visible
    pub show_help: bool,
    /// Results overlay closed by the user
    pub hide_results: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Status message timestamp
    pub status_time: Option<Instant>,
    /// Exit requested
    pub should_quit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_tutorial: true,
            show_help: false,
            hide_results: false,
            status_message: None,
            status_time: None,
            should_quit: false,
        }
    }
}

impl UiState {
    /// Set a status message that will be displayed temporarily
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_time = Some(Instant::now());
    }

    /// Clear expired status message
    pub fn clear_expired_status(&mut self) {
        if let Some(time) = self.status_time {
            if time.elapsed() > Duration::from_secs(3) {
                self.status_message = None;
                self.status_time = None;
            }
        }
    }
}

/// User action decoded from a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// No action needed
    None,
    /// Quit the application
    Quit,
    /// Close the tutorial
    DismissTutorial,
    /// Toggle play/pause
    TogglePlay,
    /// Rewind and start over
    Restart,
    /// End the session
    Finish,
    /// Label the current section
    Detect(SectionType),
    /// Toggle help
    ToggleHelp,
    /// Reload media after a failure
    Reload,
    /// Close the top overlay or error
    Dismiss,
}

/// Decode a key press
pub fn map_key(code: KeyCode, modifiers: KeyModifiers, ui: &UiState) -> KeyAction {
    match (code, modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            return KeyAction::Quit;
        }
        _ => {}
    }

    if ui.show_tutorial {
        return match code {
            KeyCode::Enter | KeyCode::Char(' ') => KeyAction::DismissTutorial,
            _ => KeyAction::None,
        };
    }

    match (code, modifiers) {
        // Transport
        (KeyCode::Char(' '), KeyModifiers::NONE) => KeyAction::TogglePlay,
        (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::Restart,
        (KeyCode::Char('f'), KeyModifiers::NONE) => KeyAction::Finish,
        (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::Reload,

        // Guesses (1-4)
        (KeyCode::Char(c @ '1'..='4'), KeyModifiers::NONE) => {
            let slot = (c as usize) - ('1' as usize);
            SectionType::from_slot(slot).map_or(KeyAction::None, KeyAction::Detect)
        }

        // Help
        (KeyCode::Char('?'), _) | (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::ToggleHelp,
        (KeyCode::Esc, _) => KeyAction::Dismiss,

        _ => KeyAction::None,
    }
}

/// Apply an action; returns the token of a new feedback pulse, if any
pub fn dispatch<P: MediaPlayer>(
    ui: &mut UiState,
    session: &mut Session<P>,
    action: KeyAction,
) -> Option<FeedbackToken> {
    match action {
        KeyAction::None => {}
        KeyAction::Quit => ui.should_quit = true,
        KeyAction::DismissTutorial => ui.show_tutorial = false,
        KeyAction::TogglePlay => {
            if let Err(e) = session.toggle_play() {
                ui.set_status(e.to_string());
            }
        }
        KeyAction::Restart => match session.restart() {
            Ok(()) => ui.hide_results = false,
            Err(e) => ui.set_status(e.to_string()),
        },
        KeyAction::Finish => {
            session.finish();
            ui.hide_results = false;
        }
        KeyAction::Detect(kind) => match session.detect(kind) {
            Some(detection) => return detection.feedback,
            None if session.phase() == Phase::Paused => ui.set_status("Resume playback to guess"),
            None => {}
        },
        KeyAction::ToggleHelp => ui.show_help = !ui.show_help,
        KeyAction::Reload => session.reload(),
        KeyAction::Dismiss => {
            if ui.show_help {
                ui.show_help = false;
            } else if session.phase() == Phase::Finished {
                ui.hide_results = true;
            } else {
                session.dismiss_error();
            }
        }
    }
    None
}

/// Messages into the event loop
#[derive(Debug)]
pub enum AppMessage {
    /// Terminal input
    Input(Event),
    /// A feedback pulse's lifetime ran out
    FeedbackExpired(FeedbackToken),
}

/// Terminal UI application
pub struct App {
    /// UI-only state
    ui: UiState,
    /// Piece metadata for the header and results
    piece: PieceConfig,
    /// Terminal handle
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Target frame rate
    frame_rate: u32,
    /// Feedback pulse lifetime
    feedback_duration: Duration,
}

impl App {
    /// Set up the terminal
    pub fn new(piece: PieceConfig, settings: &Settings) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            ui: UiState::default(),
            piece,
            terminal,
            frame_rate: settings.frame_rate.clamp(1, 120),
            feedback_duration: settings.feedback_duration(),
        })
    }

    /// Run until the user quits
    pub async fn run<P: MediaPlayer>(&mut self, session: &mut Session<P>) -> Result<()> {
        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);

        // Keyboard input; the thread exits once the loop drops the receiver
        let input_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            if input_tx.is_closed() {
                break;
            }
            match event::poll(Duration::from_millis(50)) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if input_tx.blocking_send(AppMessage::Input(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                },
                Ok(false) => {}
                Err(_) => break,
            }
        });

        let mut frame_tick = tokio::time::interval(Duration::from_millis(1000 / self.frame_rate as u64));
        frame_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!("ui started");
        while !self.ui.should_quit {
            self.draw(&QuizView::capture(session))?;

            tokio::select! {
                Some(msg) = rx.recv() => self.handle_message(msg, session, &tx),
                _ = frame_tick.tick() => {
                    session.pump();
                    self.ui.clear_expired_status();
                }
            }
        }
        info!("ui stopped");
        Ok(())
    }

    fn handle_message<P: MediaPlayer>(
        &mut self,
        msg: AppMessage,
        session: &mut Session<P>,
        tx: &mpsc::Sender<AppMessage>,
    ) {
        match msg {
            AppMessage::Input(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                let action = map_key(key.code, key.modifiers, &self.ui);
                if let Some(token) = dispatch(&mut self.ui, session, action) {
                    let tx = tx.clone();
                    let lifetime = self.feedback_duration;
                    tokio::spawn(async move {
                        tokio::time::sleep(lifetime).await;
                        let _ = tx.send(AppMessage::FeedbackExpired(token)).await;
                    });
                }
            }
            AppMessage::Input(_) => {}
            AppMessage::FeedbackExpired(token) => {
                if !session.clear_feedback(token) {
                    debug!(generation = token.generation(), "stale feedback timer");
                }
            }
        }
    }

    /// Draw the UI
    pub fn draw(&mut self, view: &QuizView) -> io::Result<()> {
        let ui = &self.ui;
        let piece = &self.piece;

        self.terminal.draw(|frame| {
            let area = frame.area();
            let error_height = if view.error.is_some() { 3 } else { 0 };

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),            // Header
                    Constraint::Length(error_height), // Error banner
                    Constraint::Length(8),            // Timeline
                    Constraint::Length(4),            // Guess buttons
                    Constraint::Length(3),            // Transport
                    Constraint::Min(0),               // Padding
                    Constraint::Length(1),            // Status bar
                ])
                .split(area);

            render_header(frame, chunks[0], piece);
            if let Some(error) = &view.error {
                render_error(frame, chunks[1], error);
            }
            frame.render_widget(
                TimelineWidget::new(view).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Form Tracker (labels hidden) "),
                ),
                chunks[2],
            );
            frame.render_widget(GuessPadWidget::new(view), chunks[3]);
            frame.render_widget(
                TransportWidget::new(view)
                    .block(Block::default().borders(Borders::ALL).title(" Transport ")),
                chunks[4],
            );
            render_status_bar(frame, chunks[6], ui);

            if view.phase == Phase::Finished && !ui.hide_results {
                let results_area = centered_rect(70, 22, area);
                frame.render_widget(ResultsWidget::new(view.summary, &piece.notes), results_area);
            }
            if ui.show_tutorial {
                render_tutorial_overlay(frame, area, view.timeline.len());
            }
            if ui.show_help {
                render_help_overlay(frame, area);
            }
        })?;

        Ok(())
    }

    /// Cleanup terminal on drop
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Centered rectangle of at most `width` x `height`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Render header
fn render_header(frame: &mut Frame, area: Rect, piece: &PieceConfig) {
    let title = Line::from(vec![
        Span::styled(
            "DETECTIVE: ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("RONDO", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("   {}: {}", piece.composer, piece.title),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

/// Render error banner
fn render_error(frame: &mut Frame, area: Rect, error: &SessionError) {
    let hint = match error {
        SessionError::MediaLoad(_) => "  (l: reload)",
        SessionError::PlaybackRejected(_) => "  (Space: retry, Esc: dismiss)",
    };
    let banner = Paragraph::new(Line::from(vec![
        Span::styled(error.to_string(), Style::default().fg(Color::LightRed)),
        Span::styled(hint, Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(banner, area);
}

/// Render status bar
fn render_status_bar(frame: &mut Frame, area: Rect, state: &UiState) {
    let text = if let Some(ref msg) = state.status_message {
        Span::styled(msg, Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            " 1-4: Label section | Space: Play/Pause | r: Restart | f: Finish | h: Help | q: Quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    frame.render_widget(Paragraph::new(text), area);
}

/// Render tutorial overlay
fn render_tutorial_overlay(frame: &mut Frame, area: Rect, section_count: usize) {
    let tutorial_area = centered_rect(64, 18, area);
    frame.render_widget(Clear, tutorial_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Form Identification ")
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(tutorial_area);
    frame.render_widget(block, tutorial_area);

    let mut lines = vec![
        Line::from(format!(
            "The conductor has split the piece into {} sections.",
            section_count
        )),
        Line::from("Listen to melody, mood, key and texture, and give each"),
        Line::from("section its identity the moment you hear it."),
        Line::from("One answer per section: the first one counts."),
        Line::from(""),
    ];
    for kind in SectionType::ALL {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {}  {:<5}", kind.slot() + 1, kind.label()),
                Style::default()
                    .fg(section_color(kind))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(kind.description(), Style::default().fg(Color::Gray)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: start",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_area = centered_rect(44, 14, area);
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let help_text = vec![
        Line::from(Span::styled("Guessing", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  1-4         A / B / C / Coda"),
        Line::from(""),
        Line::from(Span::styled("Transport", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Space       Play/Pause"),
        Line::from("  r           Restart (clears answers)"),
        Line::from("  f           Finish and score"),
        Line::from("  l           Reload audio after an error"),
        Line::from(""),
        Line::from(Span::styled("Other", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Esc         Close overlay"),
        Line::from("  h/?         Toggle help"),
        Line::from("  q/Ctrl+c    Quit"),
    ];

    frame.render_widget(Paragraph::new(help_text), inner);
}
