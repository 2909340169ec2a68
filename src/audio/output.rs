// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Audio output via cpal.
//!
//! Opens the default output device at its preferred rate and channel count
//! and fills buffers from a callback.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream, StreamConfig};
use tracing::warn;

use super::AudioError;

/// Negotiated output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of output channels
    pub channels: u16,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            channels: 2,
        }
    }
}

/// Running output stream; audio stops when dropped
pub struct AudioOutput {
    _stream: Stream,
    config: AudioConfig,
}

impl AudioOutput {
    /// Open the default device and start calling `callback`
    ///
    /// The callback receives a zeroed interleaved `f32` buffer and the
    /// channel count.
    pub fn open<F>(mut callback: F) -> Result<Self, AudioError>
    where
        F: FnMut(&mut [f32], usize) + Send + 'static,
    {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;

        let supported = device
            .default_output_config()
            .map_err(|e| AudioError::InitFailed(e.to_string()))?;
        if supported.sample_format() != SampleFormat::F32 {
            return Err(AudioError::InitFailed(format!(
                "unsupported sample format {:?}",
                supported.sample_format()
            )));
        }

        let stream_config: StreamConfig = supported.config();
        let config = AudioConfig {
            sample_rate: stream_config.sample_rate.0,
            channels: stream_config.channels,
        };
        let channels = config.channels as usize;

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    data.fill(0.0);
                    callback(data, channels);
                },
                move |err| {
                    warn!("audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| AudioError::StreamFailed(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamFailed(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            config,
        })
    }

    /// Negotiated format
    pub fn config(&self) -> AudioConfig {
        self.config
    }
}

/// Name of the default output device, if any
pub fn default_device_name() -> Option<String> {
    cpal::default_host()
        .default_output_device()
        .and_then(|d| d.name().ok())
}
