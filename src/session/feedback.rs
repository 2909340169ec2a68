// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Transient guess feedback.
//!
//! Every pulse carries a token from a generation counter. A timer that
//! fires with an old token (an earlier guess, or a guess from before a
//! restart) finds a different generation and leaves the current pulse alone.

use std::time::Duration;

use crate::timeline::SectionType;

/// Default pulse lifetime
pub const FEEDBACK_DURATION: Duration = Duration::from_millis(500);

/// Identifies one feedback pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeedbackToken(u64);

impl FeedbackToken {
    /// Raw generation number
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// What the pulse signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    /// Success pulse on the chosen control
    Correct(SectionType),
    /// Error shake on the chosen control
    Incorrect(SectionType),
}

impl FeedbackKind {
    /// Control the pulse is attached to
    pub fn section_type(&self) -> SectionType {
        match self {
            FeedbackKind::Correct(t) | FeedbackKind::Incorrect(t) => *t,
        }
    }
}

/// A live pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub token: FeedbackToken,
}

/// Current pulse plus the generation counter
#[derive(Debug, Clone, Default)]
pub struct FeedbackSlot {
    generation: u64,
    current: Option<Feedback>,
}

impl FeedbackSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current pulse and return its token
    pub fn show(&mut self, kind: FeedbackKind) -> FeedbackToken {
        self.generation += 1;
        let token = FeedbackToken(self.generation);
        self.current = Some(Feedback { kind, token });
        token
    }

    /// Clear the pulse if `token` is still current; returns whether it cleared
    pub fn expire(&mut self, token: FeedbackToken) -> bool {
        match self.current {
            Some(feedback) if feedback.token == token => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the pulse and invalidate every outstanding token
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.current = None;
    }

    /// Current pulse
    pub fn current(&self) -> Option<Feedback> {
        self.current
    }
}
