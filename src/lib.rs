// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! RONDO - Section Detective
//!
//! An ear-training quiz for musical form. The piece plays while the user
//! labels each section (A, B, C or Coda) as it is heard; correct labels
//! score toward a one-to-five star rating.

pub mod audio;
pub mod config;
pub mod ledger;
pub mod media;
pub mod score;
pub mod session;
pub mod timeline;
pub mod ui;

pub use ledger::{submit_guess, Guess, GuessOutcome, Ledger};
pub use media::{ClockPlayer, MediaError, MediaEvent, MediaPlayer};
pub use score::{compute_score, ScoreSummary};
pub use session::{Phase, Session, SessionError, SessionState};
pub use timeline::{Section, SectionType, Timeline, TimelineError};
