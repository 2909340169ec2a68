// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Audio feedback for the quiz.
//!
//! This module provides:
//! - The [`FeedbackCue`] seam the session fires on correct guesses
//! - Chime synthesis
//! - A cpal-backed cue player

pub mod chime;
pub mod output;

pub use chime::ChimeVoice;
pub use output::{AudioConfig, AudioOutput};

use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Audio error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AudioError {
    /// Failed to initialize audio
    #[error("audio initialization failed: {0}")]
    InitFailed(String),
    /// Failed to build or start the output stream
    #[error("audio stream failed: {0}")]
    StreamFailed(String),
    /// Failed to acquire lock
    #[error("failed to acquire audio lock")]
    LockFailed,
    /// No audio device available
    #[error("no audio device available")]
    NoDevice,
}

/// Fire-and-forget audio cue for correct guesses.
///
/// Callers ignore failures; a missing cue never affects the quiz.
pub trait FeedbackCue {
    /// Play the success cue
    fn play_correct(&mut self) -> Result<(), AudioError>;
}

/// Success chime on the default output device
pub struct ChimePlayer {
    voice: Arc<Mutex<ChimeVoice>>,
    output: AudioOutput,
}

impl ChimePlayer {
    /// Open the default device
    pub fn open(gain: f32) -> Result<Self, AudioError> {
        // Rate is fixed up once the device format is known
        let voice = Arc::new(Mutex::new(ChimeVoice::new(44100, gain)));

        let shared = Arc::clone(&voice);
        let output = AudioOutput::open(move |buffer, channels| {
            if let Ok(mut voice) = shared.lock() {
                voice.render(buffer, channels);
            }
        })?;

        let sample_rate = output.config().sample_rate;
        if let Ok(mut voice) = voice.lock() {
            *voice = ChimeVoice::new(sample_rate, gain);
        }

        Ok(Self { voice, output })
    }

    /// Negotiated output format
    pub fn config(&self) -> AudioConfig {
        self.output.config()
    }
}

impl FeedbackCue for ChimePlayer {
    fn play_correct(&mut self) -> Result<(), AudioError> {
        let mut voice = self.voice.lock().map_err(|_| AudioError::LockFailed)?;
        voice.trigger();
        Ok(())
    }
}
