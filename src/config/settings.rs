// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! User settings (TOML).

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::session::FEEDBACK_DURATION;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// How long a guess feedback pulse stays visible, in milliseconds
    pub feedback_ms: u64,
    /// Play a chime on correct guesses
    pub chime: bool,
    /// Chime start gain (0.0 - 1.0)
    pub chime_gain: f32,
    /// UI refresh rate
    pub frame_rate: u32,
    /// Log file path
    pub log_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            feedback_ms: FEEDBACK_DURATION.as_millis() as u64,
            chime: true,
            chime_gain: 0.1,
            frame_rate: 30,
            log_file: "rondo.log".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read settings file: {:?}", path.as_ref()))?;
        Self::from_toml(&contents)
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse settings from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text).context("Failed to parse settings TOML")?;
        Ok(settings.sanitized())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize settings to TOML")
    }

    /// Feedback pulse lifetime
    pub fn feedback_duration(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }

    fn sanitized(mut self) -> Self {
        self.chime_gain = self.chime_gain.clamp(0.0, 1.0);
        self.frame_rate = self.frame_rate.clamp(1, 120);
        self.feedback_ms = self.feedback_ms.clamp(50, 5000);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.feedback_duration(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_file() {
        let settings = Settings::from_toml("chime = false\nframe_rate = 60\n").unwrap();
        assert!(!settings.chime);
        assert_eq!(settings.frame_rate, 60);
        assert_eq!(settings.feedback_ms, 500);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let settings = Settings::from_toml("chime_gain = 4.0\nframe_rate = 0\nfeedback_ms = 1\n").unwrap();
        assert_eq!(settings.chime_gain, 1.0);
        assert_eq!(settings.frame_rate, 1);
        assert_eq!(settings.feedback_ms, 50);
    }

    #[test]
    fn test_bad_toml() {
        assert!(Settings::from_toml("frame_rate = \"fast\"").is_err());
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rondo.toml");
        assert_eq!(Settings::load_or_default(&path).unwrap(), Settings::default());

        let mut custom = Settings::default();
        custom.feedback_ms = 750;
        fs::write(&path, custom.to_toml().unwrap()).unwrap();
        assert_eq!(Settings::load_or_default(&path).unwrap().feedback_ms, 750);
    }
}
