// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Star rating.

use crate::ledger::Ledger;

/// Highest rating
pub const MAX_STARS: u8 = 5;

/// Lowest rating, awarded even with no correct guesses
pub const MIN_STARS: u8 = 1;

/// Convert a ledger into a 1-5 star rating
///
/// `round(correct / total * 5)` with halves rounded up, then clamped to
/// `[MIN_STARS, MAX_STARS]`.
pub fn compute_score(ledger: &Ledger, total_sections: usize) -> u8 {
    stars_for(ledger.correct_count(), total_sections)
}

/// Rating for a raw correct count
pub fn stars_for(correct: usize, total_sections: usize) -> u8 {
    if total_sections == 0 {
        return MIN_STARS;
    }

    // floor(correct * 5 / total + 1/2), in integers
    let max = MAX_STARS as usize;
    let rounded = (2 * correct * max + total_sections) / (2 * total_sections);
    rounded.clamp(MIN_STARS as usize, max) as u8
}

/// Result figures shown when a session finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSummary {
    /// Star rating
    pub stars: u8,
    /// Correct guesses
    pub correct: usize,
    /// Incorrect guesses
    pub incorrect: usize,
    /// Sections in the timeline
    pub total: usize,
}

impl ScoreSummary {
    /// Summarize a ledger
    pub fn from_ledger(ledger: &Ledger, total_sections: usize) -> Self {
        Self {
            stars: compute_score(ledger, total_sections),
            correct: ledger.correct_count(),
            incorrect: ledger.incorrect_count(),
            total: total_sections,
        }
    }

    /// Sections the user never labelled
    pub fn unanswered(&self) -> usize {
        self.total.saturating_sub(self.correct + self.incorrect)
    }
}
