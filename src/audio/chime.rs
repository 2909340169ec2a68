// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Success chime synthesis.
//!
//! A short sine blip: pitch falls exponentially from 880 Hz to 440 Hz and
//! gain decays exponentially to a tenth of its start over 100 ms.

use std::f32::consts::TAU;

/// Chime start frequency in Hz
pub const CHIME_START_HZ: f32 = 880.0;

/// Chime end frequency in Hz
pub const CHIME_END_HZ: f32 = 440.0;

/// Chime length in seconds
pub const CHIME_SECONDS: f32 = 0.1;

/// Default start gain
pub const CHIME_GAIN: f32 = 0.1;

/// One-shot chime voice, rendered sample by sample
#[derive(Debug, Clone)]
pub struct ChimeVoice {
    /// Output sample rate
    sample_rate: u32,
    /// Gain at the start of the chime
    gain: f32,
    /// Oscillator phase in radians
    phase: f32,
    /// Samples rendered since the trigger
    position: u32,
    /// Whether the chime is sounding
    active: bool,
}

impl ChimeVoice {
    /// Create a silent voice
    pub fn new(sample_rate: u32, gain: f32) -> Self {
        Self {
            sample_rate: sample_rate.max(1),
            gain: gain.clamp(0.0, 1.0),
            phase: 0.0,
            position: 0,
            active: false,
        }
    }

    /// Start (or restart) the chime
    pub fn trigger(&mut self) {
        self.phase = 0.0;
        self.position = 0;
        self.active = true;
    }

    /// Check if the chime is sounding
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Length of the chime in samples
    pub fn length_samples(&self) -> u32 {
        (CHIME_SECONDS * self.sample_rate as f32).round() as u32
    }

    /// Frequency `t` seconds into the chime
    pub fn frequency_at(t: f32) -> f32 {
        let progress = (t / CHIME_SECONDS).clamp(0.0, 1.0);
        CHIME_START_HZ * (CHIME_END_HZ / CHIME_START_HZ).powf(progress)
    }

    /// Gain `t` seconds into the chime
    pub fn gain_at(&self, t: f32) -> f32 {
        let progress = (t / CHIME_SECONDS).clamp(0.0, 1.0);
        self.gain * 0.1f32.powf(progress)
    }

    /// Next mono sample
    pub fn next_sample(&mut self) -> f32 {
        if !self.active {
            return 0.0;
        }
        if self.position >= self.length_samples() {
            self.active = false;
            return 0.0;
        }

        let t = self.position as f32 / self.sample_rate as f32;
        let sample = self.phase.sin() * self.gain_at(t);

        self.phase += TAU * Self::frequency_at(t) / self.sample_rate as f32;
        if self.phase >= TAU {
            self.phase -= TAU;
        }
        self.position += 1;
        sample
    }

    /// Mix into an interleaved buffer
    pub fn render(&mut self, buffer: &mut [f32], channels: usize) {
        if !self.active {
            return;
        }
        for frame in buffer.chunks_mut(channels.max(1)) {
            let sample = self.next_sample();
            for out in frame.iter_mut() {
                *out += sample;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_until_triggered() {
        let mut voice = ChimeVoice::new(44100, CHIME_GAIN);
        let mut buffer = vec![0.0f32; 256];
        voice.render(&mut buffer, 2);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_envelope() {
        assert_eq!(ChimeVoice::frequency_at(0.0), 880.0);
        assert!((ChimeVoice::frequency_at(CHIME_SECONDS) - 440.0).abs() < 0.01);
        assert!((ChimeVoice::frequency_at(0.05) - 622.25).abs() < 0.1);

        let voice = ChimeVoice::new(44100, 0.1);
        assert!((voice.gain_at(0.0) - 0.1).abs() < 1e-6);
        assert!((voice.gain_at(CHIME_SECONDS) - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_chime_plays_then_stops() {
        let mut voice = ChimeVoice::new(48000, CHIME_GAIN);
        voice.trigger();
        assert_eq!(voice.length_samples(), 4800);

        let mut buffer = vec![0.0f32; 4800 * 2];
        voice.render(&mut buffer, 2);

        let peak = buffer.iter().fold(0.0f32, |m, &s| m.max(s.abs()));
        assert!(peak > 0.0);
        assert!(peak <= CHIME_GAIN + 1e-6);
        // Interleaved channels carry the same sample
        assert_eq!(buffer[10], buffer[11]);

        assert_eq!(voice.next_sample(), 0.0);
        assert!(!voice.is_active());
    }

    #[test]
    fn test_retrigger_restarts() {
        let mut voice = ChimeVoice::new(8000, CHIME_GAIN);
        voice.trigger();
        for _ in 0..400 {
            voice.next_sample();
        }
        voice.trigger();
        assert!(voice.is_active());
        assert_eq!(voice.next_sample(), 0.0); // sin(0)
    }
}
