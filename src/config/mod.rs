// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system for RONDO.
//!
//! This module provides data structures for loading the quiz definition
//! (YAML: the piece and its section layout) and user settings (TOML).

pub mod settings;

pub use settings::Settings;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::timeline::{Section, Timeline};

/// Root configuration for a quiz
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizFile {
    /// Piece metadata
    #[serde(default)]
    pub piece: PieceConfig,
    /// Section layout in chronological order
    #[serde(default = "default_sections")]
    pub sections: Vec<Section>,
}

impl QuizFile {
    /// Load a quiz from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read quiz file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a quiz from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse quiz YAML")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize quiz to YAML")
    }

    /// Save the quiz to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write quiz file: {:?}", path.as_ref()))
    }

    /// Validated timeline for this quiz
    pub fn timeline(&self) -> Result<Timeline> {
        Timeline::new(self.sections.clone()).context("Invalid section layout")
    }
}

impl Default for QuizFile {
    fn default() -> Self {
        Self {
            piece: PieceConfig::default(),
            sections: default_sections(),
        }
    }
}

fn default_sections() -> Vec<Section> {
    Timeline::rondo_alla_turca().sections().to_vec()
}

/// Piece metadata and the audio source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PieceConfig {
    /// Title shown in the header
    #[serde(default = "default_title")]
    pub title: String,
    /// Composer shown in the header
    #[serde(default = "default_composer")]
    pub composer: String,
    /// Audio source handed to the playback facility
    #[serde(default = "default_audio_url")]
    pub audio_url: String,
    /// Track length in seconds, reported as media metadata
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Notes on each section type, shown with the results
    #[serde(default = "default_notes")]
    pub notes: Vec<String>,
}

fn default_title() -> String {
    "Turkish March".to_string()
}
fn default_composer() -> String {
    "Mozart".to_string()
}
fn default_audio_url() -> String {
    "https://r2work.bohubs.com/audio/Turkish%20March%20Mozart%20-%20Rondo%20Alla%20Turca.mp3"
        .to_string()
}
fn default_duration() -> f64 {
    205.0
}
fn default_notes() -> Vec<String> {
    vec![
        "A (A minor): the light, slightly melancholy refrain. The core of the piece; it returns twice.".to_string(),
        "B (A major): the bold Turkish march. An episode that comes back three times.".to_string(),
        "C (F# minor): a dense, running stream of notes. The darkest, most restless part.".to_string(),
        "Coda (A major): the brilliant finale, with octave leaps and ringing chords.".to_string(),
    ]
}

impl Default for PieceConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            composer: default_composer(),
            audio_url: default_audio_url(),
            duration: default_duration(),
            notes: default_notes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::SectionType;
    use tempfile::tempdir;

    #[test]
    fn test_parse_quiz() {
        let yaml = r#"
piece:
  title: "Rondo in D"
  composer: "Mozart"
  audio_url: "file:///music/k485.mp3"
  duration: 90

sections:
  - { type: A, start: 0, end: 30 }
  - { type: B, start: 30, end: 55 }
  - { type: Coda, start: 55, end: 300 }
"#;

        let quiz = QuizFile::from_yaml(yaml).unwrap();
        assert_eq!(quiz.piece.title, "Rondo in D");
        assert_eq!(quiz.piece.duration, 90.0);
        assert_eq!(quiz.sections.len(), 3);
        assert_eq!(quiz.sections[2].kind, SectionType::Coda);

        let timeline = quiz.timeline().unwrap();
        assert_eq!(timeline.section_at(60.0, quiz.piece.duration), Some(2));
    }

    #[test]
    fn test_default_values() {
        let quiz = QuizFile::from_yaml("piece:\n  title: \"Minimal\"\n").unwrap();
        assert_eq!(quiz.piece.title, "Minimal");
        assert_eq!(quiz.piece.composer, "Mozart");
        assert_eq!(quiz.piece.notes.len(), 4);
        assert_eq!(quiz.sections.len(), 7);
        assert_eq!(quiz.timeline().unwrap(), Timeline::rondo_alla_turca());
    }

    #[test]
    fn test_invalid_layout_is_rejected() {
        let yaml = r#"
sections:
  - { type: A, start: 0, end: 30 }
  - { type: B, start: 31, end: 55 }
"#;
        let quiz = QuizFile::from_yaml(yaml).unwrap();
        assert!(quiz.timeline().is_err());
    }

    #[test]
    fn test_unknown_section_type() {
        let yaml = "sections:\n  - { type: D, start: 0, end: 30 }\n";
        assert!(QuizFile::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quiz.yaml");

        let mut quiz = QuizFile::default();
        quiz.piece.duration = 187.5;
        quiz.save(&path).unwrap();

        let loaded = QuizFile::load(&path).unwrap();
        assert_eq!(loaded, quiz);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        assert!(QuizFile::load(dir.path().join("nope.yaml")).is_err());
    }
}
