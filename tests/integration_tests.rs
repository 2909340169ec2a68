// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for RONDO
//!
//! These tests drive a full session through the public API with a scripted
//! playback facility in place of real audio.

use rondo::config::QuizFile;
use rondo::ledger::{submit_guess, GuessOutcome, Ledger};
use rondo::media::{MediaError, MediaEvent, MediaPlayer};
use rondo::score::{compute_score, stars_for};
use rondo::session::{Phase, Session, SessionError};
use rondo::timeline::{Section, SectionType, Timeline};

use SectionType::*;

/// Playback facility whose position is moved by the test
#[derive(Default)]
struct ScriptedPlayer {
    duration: f64,
    position: f64,
    playing: bool,
    reject_play: bool,
    events: Vec<MediaEvent>,
}

impl ScriptedPlayer {
    fn with_duration(duration: f64) -> Self {
        Self {
            duration,
            ..Default::default()
        }
    }
}

impl MediaPlayer for ScriptedPlayer {
    fn load(&mut self) {
        self.events.push(MediaEvent::MetadataReady(self.duration));
    }
    fn play(&mut self) -> Result<(), MediaError> {
        if self.reject_play {
            return Err(MediaError::Rejected("autoplay blocked".to_string()));
        }
        self.playing = true;
        Ok(())
    }
    fn pause(&mut self) {
        self.playing = false;
    }
    fn seek(&mut self, position: f64) {
        self.position = position;
    }
    fn position(&self) -> f64 {
        self.position
    }
    fn duration(&self) -> Option<f64> {
        Some(self.duration)
    }
    fn is_playing(&self) -> bool {
        self.playing
    }
    fn poll_events(&mut self) -> Vec<MediaEvent> {
        std::mem::take(&mut self.events)
    }
}

fn abc() -> Timeline {
    Timeline::new(vec![
        Section::new(A, 0.0, 22.0),
        Section::new(B, 22.0, 45.0),
        Section::new(C, 45.0, 68.0),
    ])
    .unwrap()
}

fn playing(timeline: Timeline, duration: f64) -> Session<ScriptedPlayer> {
    let mut session = Session::new(timeline, ScriptedPlayer::with_duration(duration));
    session.pump();
    assert_eq!(session.phase(), Phase::Ready);
    session.play().unwrap();
    session
}

fn guess_at(session: &mut Session<ScriptedPlayer>, time: f64, kind: SectionType) -> GuessOutcome {
    session.player_mut().seek(time);
    session.detect(kind).map(|d| d.outcome).unwrap()
}

#[test]
fn test_three_section_round() {
    let mut session = playing(abc(), 68.0);

    assert_eq!(guess_at(&mut session, 10.0, A), GuessOutcome::Correct(A));
    let snapshot = session.state().ledger.clone();
    assert_eq!(guess_at(&mut session, 10.0, B), GuessOutcome::AlreadyGuessed);
    assert_eq!(session.state().ledger, snapshot);

    assert_eq!(guess_at(&mut session, 50.0, C), GuessOutcome::Correct(C));
    assert_eq!(guess_at(&mut session, 50.0, B), GuessOutcome::AlreadyGuessed);

    session.finish();
    let summary = session.summary();
    assert_eq!(summary.correct, 2);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.stars, 3);
    assert_eq!(summary.unanswered(), 1);
}

#[test]
fn test_all_wrong_scores_one_star() {
    let timeline = Timeline::rondo_alla_turca();
    let starts: Vec<f64> = timeline.sections().iter().map(|s| s.start + 1.0).collect();
    let mut session = playing(timeline, 190.0);

    for time in starts {
        let outcome = guess_at(&mut session, time, Coda);
        assert!(outcome.is_recorded());
    }
    // The last section really is the coda
    assert_eq!(session.state().ledger.correct_count(), 1);

    let mut wrong = Ledger::new();
    let timeline = Timeline::rondo_alla_turca();
    for section in timeline.sections() {
        let guess = if section.kind == A { B } else { A };
        wrong.submit(&timeline, section.start, 190.0, guess);
    }
    assert_eq!(wrong.len(), 7);
    assert_eq!(compute_score(&wrong, 7), 1);
}

#[test]
fn test_restart_resets_round() {
    let mut session = playing(abc(), 68.0);
    guess_at(&mut session, 5.0, A);
    guess_at(&mut session, 30.0, C);
    guess_at(&mut session, 60.0, C);
    session.finish();
    assert!(session.state().is_game_over);

    session.restart().unwrap();
    assert!(session.state().ledger.is_empty());
    assert!(!session.state().is_game_over);
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.state().current_time, 0.0);
    assert_eq!(session.current_section(), Some(0));

    assert_eq!(guess_at(&mut session, 5.0, A), GuessOutcome::Correct(A));
}

#[test]
fn test_finish_stops_guessing() {
    let mut session = playing(abc(), 68.0);
    guess_at(&mut session, 5.0, A);
    session.finish();

    assert!(!session.player().is_playing());
    assert!(session.state().is_game_over);

    session.player_mut().seek(30.0);
    assert!(session.detect(B).is_none());
    assert_eq!(session.state().ledger.len(), 1);
}

#[test]
fn test_rejected_play_is_recoverable() {
    let mut player = ScriptedPlayer::with_duration(68.0);
    player.reject_play = true;
    let mut session = Session::new(abc(), player);
    session.pump();

    assert!(matches!(session.toggle_play(), Err(SessionError::PlaybackRejected(_))));
    assert_eq!(session.phase(), Phase::Ready);

    session.player_mut().reject_play = false;
    session.dismiss_error();
    session.toggle_play().unwrap();
    assert_eq!(session.phase(), Phase::Playing);
    assert!(session.last_error().is_none());
}

#[test]
fn test_ended_event_shows_results() {
    let mut session = playing(abc(), 68.0);
    guess_at(&mut session, 5.0, A);
    session.handle_event(MediaEvent::Position(68.0));
    session.handle_event(MediaEvent::Ended);

    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.score(), stars_for(1, 3));
}

#[test]
fn test_section_at_covers_track() {
    let timeline = Timeline::rondo_alla_turca();
    for duration in [100.0, 190.0, 205.0, 400.0] {
        let mut t = 0.0;
        while t < duration {
            let index = timeline.section_at(t, duration).unwrap();
            let section = timeline.get(index).unwrap();
            let end = timeline.effective_end(index, duration).unwrap();
            assert!(section.start <= t && t < end, "t={} d={}", t, duration);
            t += 0.25;
        }
        assert_eq!(timeline.section_at(duration, duration), None);
        assert_eq!(timeline.section_at(-0.1, duration), None);
    }
}

#[test]
fn test_pure_submit_is_idempotent_per_section() {
    let timeline = abc();
    let empty = Ledger::new();

    let (once, first) = submit_guess(&timeline, 30.0, 68.0, C, &empty);
    let (twice, second) = submit_guess(&timeline, 40.0, 68.0, B, &once);

    assert_eq!(first, GuessOutcome::Incorrect(C));
    assert_eq!(second, GuessOutcome::AlreadyGuessed);
    assert_eq!(once, twice);
    assert!(empty.is_empty());
}

#[test]
fn test_quiz_file_drives_session() {
    let yaml = r#"
piece:
  title: Short Rondo
  duration: 40.0
sections:
  - { type: A, start: 0.0, end: 10.0 }
  - { type: B, start: 10.0, end: 20.0 }
  - { type: A, start: 20.0, end: 30.0 }
  - { type: Coda, start: 30.0, end: 60.0 }
"#;
    let quiz = QuizFile::from_yaml(yaml).unwrap();
    assert_eq!(quiz.piece.composer, "Mozart");

    let mut session = playing(quiz.timeline().unwrap(), quiz.piece.duration);
    assert_eq!(guess_at(&mut session, 35.0, Coda), GuessOutcome::Correct(Coda));
    assert_eq!(session.state().ledger.guesses()[0].section_index, 3);
}
