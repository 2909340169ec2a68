// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Session controller.
//!
//! Owns the session state and drives every transition:
//!
//! ```text
//! Loading -> Ready -> Playing <-> Paused -> Finished
//!    |                  ^                      |
//!    v                  +------ restart -------+
//! Failed --reload--> Loading
//! ```
//!
//! Media lifecycle events and user actions both arrive here; nothing else
//! mutates the ledger.

pub mod feedback;

pub use feedback::{Feedback, FeedbackKind, FeedbackSlot, FeedbackToken, FEEDBACK_DURATION};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::audio::FeedbackCue;
use crate::ledger::{GuessOutcome, Ledger};
use crate::media::{MediaEvent, MediaPlayer};
use crate::score::{compute_score, ScoreSummary};
use crate::timeline::{SectionType, Timeline};

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for media metadata
    Loading,
    /// Loaded, never started
    Ready,
    /// Playing; guesses accepted
    Playing,
    /// Paused mid-track
    Paused,
    /// Game over; results available
    Finished,
    /// Media failed to load; only `reload` leaves this phase
    Failed,
}

impl Phase {
    /// Check if media metadata has been loaded
    pub fn is_loaded(&self) -> bool {
        matches!(
            self,
            Phase::Ready | Phase::Playing | Phase::Paused | Phase::Finished
        )
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Loading => "Loading",
            Phase::Ready => "Ready",
            Phase::Playing => "Playing",
            Phase::Paused => "Paused",
            Phase::Finished => "Finished",
            Phase::Failed => "Failed",
        }
    }
}

/// Errors surfaced to the user
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// Media could not be loaded; terminal until reload
    #[error("audio failed to load: {0}")]
    MediaLoad(String),
    /// Playback start was refused; the user may retry
    #[error("audio playback failed: {0}")]
    PlaybackRejected(String),
}

/// Observable session fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Last known playback position in seconds
    pub current_time: f64,
    /// Track duration; 0 until metadata arrives
    pub duration: f64,
    /// Whether playback is running
    pub is_playing: bool,
    /// Whether the session has finished
    pub is_game_over: bool,
    /// Recorded guesses
    pub ledger: Ledger,
}

/// Result of an accepted `detect`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    /// Ledger outcome
    pub outcome: GuessOutcome,
    /// Token for clearing the feedback pulse, when one was shown
    pub feedback: Option<FeedbackToken>,
}

/// Quiz session over one timeline and one playback facility
pub struct Session<P: MediaPlayer> {
    timeline: Timeline,
    player: P,
    cue: Option<Box<dyn FeedbackCue>>,
    phase: Phase,
    state: SessionState,
    feedback: FeedbackSlot,
    last_error: Option<SessionError>,
}

impl<P: MediaPlayer> Session<P> {
    /// Create a session and start loading media
    pub fn new(timeline: Timeline, mut player: P) -> Self {
        player.load();
        Self {
            timeline,
            player,
            cue: None,
            phase: Phase::Loading,
            state: SessionState::default(),
            feedback: FeedbackSlot::new(),
            last_error: None,
        }
    }

    /// Builder: attach a success cue
    pub fn with_cue(mut self, cue: Box<dyn FeedbackCue>) -> Self {
        self.cue = Some(cue);
        self
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Timeline being quizzed
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Playback facility
    pub fn player(&self) -> &P {
        &self.player
    }

    /// Mutable playback facility
    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    /// Live feedback pulse
    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback.current()
    }

    /// Most recent surfaced error
    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    /// Clear the surfaced error
    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Whether `detect` would be accepted now
    pub fn accepts_guesses(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Section at the last known position
    pub fn current_section(&self) -> Option<usize> {
        if !self.phase.is_loaded() {
            return None;
        }
        self.timeline
            .section_at(self.state.current_time, self.state.duration)
    }

    /// Star rating for the ledger as it stands
    pub fn score(&self) -> u8 {
        compute_score(&self.state.ledger, self.timeline.len())
    }

    /// Result figures for the ledger as it stands
    pub fn summary(&self) -> ScoreSummary {
        ScoreSummary::from_ledger(&self.state.ledger, self.timeline.len())
    }

    /// Drain and apply pending player events; returns how many were handled
    pub fn pump(&mut self) -> usize {
        let events = self.player.poll_events();
        let count = events.len();
        for event in events {
            self.handle_event(event);
        }
        count
    }

    /// Apply one media lifecycle event
    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::MetadataReady(duration) => {
                if self.phase != Phase::Loading {
                    debug!(duration, phase = self.phase.name(), "metadata ignored");
                    return;
                }
                if duration.is_finite() && duration > 0.0 {
                    info!(duration, "media ready");
                    self.state.duration = duration;
                    self.phase = Phase::Ready;
                } else {
                    self.fail(format!("invalid duration {}", duration));
                }
            }
            MediaEvent::Position(time) => {
                if self.phase.is_loaded() {
                    self.state.current_time = time;
                }
            }
            MediaEvent::Ended => {
                if matches!(self.phase, Phase::Playing | Phase::Paused) {
                    info!("playback ended");
                    self.finish();
                }
            }
            MediaEvent::Error(message) => {
                self.fail(message);
            }
        }
    }

    fn fail(&mut self, message: String) {
        warn!(%message, "media failed");
        self.player.pause();
        self.state.is_playing = false;
        self.phase = Phase::Failed;
        self.last_error = Some(SessionError::MediaLoad(message));
    }

    fn start_playback(&mut self) -> Result<(), SessionError> {
        self.player.play().map_err(|e| {
            let error = SessionError::PlaybackRejected(e.to_string());
            warn!(%error, phase = self.phase.name(), "play rejected");
            self.last_error = Some(error.clone());
            error
        })
    }

    /// Start or resume playback from `Ready` or `Paused`
    pub fn play(&mut self) -> Result<(), SessionError> {
        if !matches!(self.phase, Phase::Ready | Phase::Paused) {
            debug!(phase = self.phase.name(), "play ignored");
            return Ok(());
        }

        self.start_playback()?;
        self.state.is_playing = true;
        self.phase = Phase::Playing;
        info!(at = self.state.current_time, "playing");
        Ok(())
    }

    /// Pause from `Playing`
    pub fn pause(&mut self) {
        if self.phase != Phase::Playing {
            debug!(phase = self.phase.name(), "pause ignored");
            return;
        }

        self.player.pause();
        self.state.current_time = self.player.position();
        self.state.is_playing = false;
        self.phase = Phase::Paused;
        info!(at = self.state.current_time, "paused");
    }

    /// Pause when playing, play otherwise
    pub fn toggle_play(&mut self) -> Result<(), SessionError> {
        if self.phase == Phase::Playing {
            self.pause();
            Ok(())
        } else {
            self.play()
        }
    }

    /// Rewind, clear every guess and play again
    ///
    /// If playback is refused the phase and ledger are left as they were.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        if !self.phase.is_loaded() {
            debug!(phase = self.phase.name(), "restart ignored");
            return Ok(());
        }

        self.player.seek(0.0);
        self.state.current_time = self.player.position();
        self.start_playback()?;

        self.state.ledger.clear();
        self.state.is_game_over = false;
        self.state.is_playing = true;
        self.feedback.cancel();
        self.phase = Phase::Playing;
        info!("restarted");
        Ok(())
    }

    /// End the session from `Playing` or `Paused`
    pub fn finish(&mut self) {
        if !matches!(self.phase, Phase::Playing | Phase::Paused) {
            debug!(phase = self.phase.name(), "finish ignored");
            return;
        }

        self.player.pause();
        self.state.current_time = self.player.position();
        self.state.is_playing = false;
        self.state.is_game_over = true;
        self.phase = Phase::Finished;
        info!(
            correct = self.state.ledger.correct_count(),
            total = self.timeline.len(),
            stars = self.score(),
            "finished"
        );
    }

    /// Load the media again after a failure
    pub fn reload(&mut self) {
        if self.phase != Phase::Failed {
            debug!(phase = self.phase.name(), "reload ignored");
            return;
        }

        self.state = SessionState::default();
        self.feedback.cancel();
        self.last_error = None;
        self.phase = Phase::Loading;
        info!("reloading media");
        self.player.load();
    }

    /// Label the section playing right now
    ///
    /// Returns `None` unless the session is playing. The position is read
    /// from the player at call time, not from the last position sample.
    pub fn detect(&mut self, guessed: SectionType) -> Option<Detection> {
        if !self.accepts_guesses() {
            debug!(phase = self.phase.name(), %guessed, "guess ignored");
            return None;
        }

        let time = self.player.position();
        self.state.current_time = time;
        let outcome = self
            .state
            .ledger
            .submit(&self.timeline, time, self.state.duration, guessed);
        debug!(time, %guessed, ?outcome, "guess");

        let feedback = match outcome {
            GuessOutcome::Correct(kind) => {
                if let Some(cue) = self.cue.as_mut() {
                    if let Err(e) = cue.play_correct() {
                        warn!("feedback cue failed: {}", e);
                    }
                }
                Some(self.feedback.show(FeedbackKind::Correct(kind)))
            }
            GuessOutcome::Incorrect(kind) => Some(self.feedback.show(FeedbackKind::Incorrect(kind))),
            GuessOutcome::NoActiveSection | GuessOutcome::AlreadyGuessed => None,
        };

        Some(Detection { outcome, feedback })
    }

    /// Clear the feedback pulse identified by `token`, if still current
    pub fn clear_feedback(&mut self, token: FeedbackToken) -> bool {
        self.feedback.expire(token)
    }
}
