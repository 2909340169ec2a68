// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timeline model.
//!
//! This module provides:
//! - Section labels (A, B, C, Coda)
//! - The ordered section layout of a track and time-to-section lookup
//! - Time formatting for display

pub mod section;
pub mod structure;

pub use section::{Section, SectionType};
pub use structure::{Timeline, TimelineError};

/// Format seconds as `m:ss`
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
