// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Wall-clock playback facility.
//!
//! Stands in for a platform media player: it knows the track's duration and
//! advances the playback position with elapsed real time, reporting the same
//! lifecycle events a real player would.

use std::time::Instant;

use tracing::debug;

use super::{MediaError, MediaEvent, MediaPlayer};

/// Transport state of the clock player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// `load` not called yet, or the source failed
    Unloaded,
    /// Loaded, not playing
    Stopped,
    /// Position advancing
    Running,
}

/// Playback facility driven by [`Instant`]
#[derive(Debug)]
pub struct ClockPlayer {
    /// Source identifier (URL of the track)
    source: String,
    /// Duration reported once loaded
    track_duration: f64,
    /// Duration after metadata load
    duration: Option<f64>,
    /// Transport state
    state: PlayerState,
    /// Position at `anchor`
    offset: f64,
    /// When playback last started
    anchor: Option<Instant>,
    /// Events not yet drained
    pending: Vec<MediaEvent>,
}

impl ClockPlayer {
    /// Create a player for a track of known length
    pub fn new(source: impl Into<String>, track_duration: f64) -> Self {
        Self {
            source: source.into(),
            track_duration,
            duration: None,
            state: PlayerState::Unloaded,
            offset: 0.0,
            anchor: None,
            pending: Vec::new(),
        }
    }

    /// Source identifier
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Transport state
    pub fn state(&self) -> PlayerState {
        self.state
    }

    fn position_at(&self, now: Instant) -> f64 {
        let elapsed = match self.anchor {
            Some(anchor) => now.saturating_duration_since(anchor).as_secs_f64(),
            None => 0.0,
        };
        let position = self.offset + elapsed;
        match self.duration {
            Some(duration) => position.min(duration),
            None => position,
        }
    }
}

impl MediaPlayer for ClockPlayer {
    fn load(&mut self) {
        self.state = PlayerState::Unloaded;
        self.offset = 0.0;
        self.anchor = None;

        if self.track_duration.is_finite() && self.track_duration > 0.0 {
            debug!(source = %self.source, duration = self.track_duration, "media loaded");
            self.duration = Some(self.track_duration);
            self.state = PlayerState::Stopped;
            self.pending.push(MediaEvent::MetadataReady(self.track_duration));
        } else {
            self.duration = None;
            self.pending.push(MediaEvent::Error(format!(
                "{}: invalid track duration {}",
                self.source, self.track_duration
            )));
        }
    }

    fn play(&mut self) -> Result<(), MediaError> {
        let duration = self.duration.ok_or(MediaError::NotLoaded)?;
        if self.state == PlayerState::Running {
            return Ok(());
        }

        // Playing from the very end starts over
        if self.offset >= duration {
            self.offset = 0.0;
        }
        self.anchor = Some(Instant::now());
        self.state = PlayerState::Running;
        Ok(())
    }

    fn pause(&mut self) {
        if self.state == PlayerState::Running {
            self.offset = self.position_at(Instant::now());
            self.anchor = None;
            self.state = PlayerState::Stopped;
        }
    }

    fn seek(&mut self, position: f64) {
        let upper = self.duration.unwrap_or(f64::MAX);
        self.offset = if position.is_finite() {
            position.clamp(0.0, upper)
        } else {
            0.0
        };
        if self.state == PlayerState::Running {
            self.anchor = Some(Instant::now());
        }
    }

    fn position(&self) -> f64 {
        self.position_at(Instant::now())
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn is_playing(&self) -> bool {
        self.state == PlayerState::Running
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        if self.state == PlayerState::Running {
            let position = self.position();
            self.pending.push(MediaEvent::Position(position));

            if let Some(duration) = self.duration {
                if position >= duration {
                    self.offset = duration;
                    self.anchor = None;
                    self.state = PlayerState::Stopped;
                    self.pending.push(MediaEvent::Ended);
                }
            }
        }
        std::mem::take(&mut self.pending)
    }
}
