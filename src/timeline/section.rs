// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Section labels and section intervals.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Structural label of a section in a rondo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionType {
    /// Main theme (refrain)
    A,
    /// First episode
    B,
    /// Second episode
    C,
    /// Closing section
    Coda,
}

impl SectionType {
    /// All labels in button order
    pub const ALL: [SectionType; 4] = [
        SectionType::A,
        SectionType::B,
        SectionType::C,
        SectionType::Coda,
    ];

    /// Short label shown on buttons and timeline marks
    pub fn label(&self) -> &'static str {
        match self {
            SectionType::A => "A",
            SectionType::B => "B",
            SectionType::C => "C",
            SectionType::Coda => "Coda",
        }
    }

    /// Character of the section, shown as a listening hint
    pub fn description(&self) -> &'static str {
        match self {
            SectionType::A => "light / melancholy",
            SectionType::B => "bold / march",
            SectionType::C => "dense / flowing",
            SectionType::Coda => "brilliant / finale",
        }
    }

    /// Zero-based button slot (keys 1-4)
    pub fn slot(&self) -> usize {
        match self {
            SectionType::A => 0,
            SectionType::B => 1,
            SectionType::C => 2,
            SectionType::Coda => 3,
        }
    }

    /// Label for a zero-based button slot
    pub fn from_slot(slot: usize) -> Option<Self> {
        Self::ALL.get(slot).copied()
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SectionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(SectionType::A),
            "b" => Ok(SectionType::B),
            "c" => Ok(SectionType::C),
            "coda" => Ok(SectionType::Coda),
            other => Err(format!("unknown section type: {}", other)),
        }
    }
}

/// A labelled interval of the track, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Structural label
    #[serde(rename = "type")]
    pub kind: SectionType,
    /// Start time (inclusive)
    pub start: f64,
    /// End time (exclusive). The last section stores a placeholder.
    pub end: f64,
}

impl Section {
    /// Create a new section
    pub fn new(kind: SectionType, start: f64, end: f64) -> Self {
        Self { kind, start, end }
    }

    /// Nominal length in seconds
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Check if `time` falls in `[start, end)` with the end clamped
    pub fn contains(&self, time: f64, end: f64) -> bool {
        time >= self.start && time < end
    }
}
