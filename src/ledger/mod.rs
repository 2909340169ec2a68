// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Guess ledger.
//!
//! Records at most one guess per section. Guesses are keyed by the section
//! playing when the guess is made, so a second guess for the same section
//! never changes the ledger.

use serde::{Deserialize, Serialize};

use crate::timeline::{SectionType, Timeline};

/// A single recorded guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    /// Index into the timeline
    pub section_index: usize,
    /// Label the user picked
    pub guessed: SectionType,
    /// Whether the label matched the section
    pub is_correct: bool,
}

/// Result of submitting a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Recorded, label matched
    Correct(SectionType),
    /// Recorded, label did not match
    Incorrect(SectionType),
    /// Playback position is outside every section; nothing recorded
    NoActiveSection,
    /// The current section already has a guess; nothing recorded
    AlreadyGuessed,
}

impl GuessOutcome {
    /// Check if the guess was recorded
    pub fn is_recorded(&self) -> bool {
        matches!(self, GuessOutcome::Correct(_) | GuessOutcome::Incorrect(_))
    }
}

/// Ordered collection of guesses, one per section at most
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    guesses: Vec<Guess>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a guess for the section playing at `time`
    pub fn submit(
        &mut self,
        timeline: &Timeline,
        time: f64,
        duration: f64,
        guessed: SectionType,
    ) -> GuessOutcome {
        let Some((section_index, section)) = timeline.section_at_with_index(time, duration) else {
            return GuessOutcome::NoActiveSection;
        };

        if self.guess_for(section_index).is_some() {
            return GuessOutcome::AlreadyGuessed;
        }

        let is_correct = guessed == section.kind;
        self.guesses.push(Guess {
            section_index,
            guessed,
            is_correct,
        });

        if is_correct {
            GuessOutcome::Correct(guessed)
        } else {
            GuessOutcome::Incorrect(guessed)
        }
    }

    /// Guess recorded for a section, if any
    pub fn guess_for(&self, section_index: usize) -> Option<&Guess> {
        self.guesses.iter().find(|g| g.section_index == section_index)
    }

    /// All guesses in the order they were made
    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    /// Number of recorded guesses
    pub fn len(&self) -> usize {
        self.guesses.len()
    }

    /// Check if no guesses have been made
    pub fn is_empty(&self) -> bool {
        self.guesses.is_empty()
    }

    /// Number of correct guesses
    pub fn correct_count(&self) -> usize {
        self.guesses.iter().filter(|g| g.is_correct).count()
    }

    /// Number of incorrect guesses
    pub fn incorrect_count(&self) -> usize {
        self.guesses.len() - self.correct_count()
    }

    /// Remove all guesses
    pub fn clear(&mut self) {
        self.guesses.clear();
    }
}

/// Pure form of [`Ledger::submit`]: returns the new ledger and the outcome
pub fn submit_guess(
    timeline: &Timeline,
    time: f64,
    duration: f64,
    guessed: SectionType,
    ledger: &Ledger,
) -> (Ledger, GuessOutcome) {
    let mut next = ledger.clone();
    let outcome = next.submit(timeline, time, duration, guessed);
    (next, outcome)
}
