// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Media playback abstraction layer.
//!
//! The quiz never decodes audio itself. It talks to a playback facility
//! through the [`MediaPlayer`] trait and consumes the lifecycle events the
//! facility reports.

pub mod clock_player;

use thiserror::Error;

pub use clock_player::ClockPlayer;

/// Playback facility errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MediaError {
    /// The source could not be loaded
    #[error("media load failed: {0}")]
    Load(String),
    /// The platform refused to start playback
    #[error("playback rejected: {0}")]
    Rejected(String),
    /// Playback was requested before metadata was available
    #[error("media not loaded")]
    NotLoaded,
}

/// Lifecycle events reported by a playback facility
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Metadata is available; carries the track duration in seconds
    MetadataReady(f64),
    /// Playback position sample in seconds
    Position(f64),
    /// Playback reached the end of the track
    Ended,
    /// The source failed to load or decode
    Error(String),
}

/// Trait for playback facilities.
///
/// `play` reports rejection through its result; callers must treat a
/// rejected play as recoverable. Everything else is reported as
/// [`MediaEvent`]s drained with `poll_events`.
pub trait MediaPlayer {
    /// Begin loading the source. Completion arrives as `MetadataReady` or `Error`.
    fn load(&mut self);

    /// Start or resume playback.
    fn play(&mut self) -> Result<(), MediaError>;

    /// Pause playback, keeping the position.
    fn pause(&mut self);

    /// Move the playback position, in seconds.
    fn seek(&mut self, position: f64);

    /// Current playback position, read fresh.
    fn position(&self) -> f64;

    /// Track duration once metadata is available.
    fn duration(&self) -> Option<f64>;

    /// Whether the facility is currently playing.
    fn is_playing(&self) -> bool;

    /// Drain pending lifecycle events.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
}
