// Letter Runner integration tests (native).
// Sessions are driven only through the public API with seeded RNGs.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use typing_adventures::collab::{CheerProvider, DEFAULT_CHEER};
use typing_adventures::runner::{KeyOutcome, RunnerSession};
use typing_adventures::{CollaboratorError, RunnerConfig, SessionState};

const FRAME: f64 = 1.0 / 60.0;

// An actor that never collides: it would have to be below the ground to be hit.
fn invincible() -> RunnerConfig {
    RunnerConfig {
        clearance: 1.0,
        ..RunnerConfig::default()
    }
}

fn started(config: RunnerConfig, seed: u64) -> RunnerSession {
    let mut s = RunnerSession::with_seed(config, seed).unwrap();
    s.start().unwrap();
    s
}

fn nearest_in_window(s: &RunnerSession) -> Option<(u64, f64, char)> {
    let cfg = s.config();
    s.obstacles()
        .iter()
        .filter(|o| o.x > cfg.window_min && o.x < cfg.window_max)
        .min_by(|a, b| a.x.total_cmp(&b.x))
        .map(|o| (o.id, o.x, o.letter))
}

#[test]
fn actor_never_sinks_below_ground() {
    let mut s = started(invincible(), 7);
    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..3_000 {
        let dt = rng.gen_range(0.0..0.5); // spikes get clamped
        s.tick(dt);
        if let Some((_, _, letter)) = nearest_in_window(&s) {
            s.press_key(&letter.to_string());
        }
        assert!(s.actor().y <= 0.0, "actor at {}", s.actor().y);
        if !s.actor().airborne {
            assert_eq!(s.actor().y, 0.0);
        }
    }
}

#[test]
fn obstacles_strictly_move_left_and_despawn_at_threshold() {
    let mut s = started(invincible(), 3);
    let mut last: HashMap<u64, f64> = HashMap::new();
    let mut removed = 0;
    for _ in 0..2_000 {
        s.tick(FRAME);
        let now: HashMap<u64, f64> = s.obstacles().iter().map(|o| (o.id, o.x)).collect();
        for (id, x) in &now {
            if let Some(prev) = last.get(id) {
                assert!(x < prev, "obstacle {id} did not move left");
            }
            assert!(*x >= s.config().despawn_x);
        }
        for (id, prev) in &last {
            if !now.contains_key(id) {
                // Gone exactly when the next step would cross the line.
                let step = s.config().scroll_speed * FRAME;
                assert!(prev - step < s.config().despawn_x, "obstacle {id} removed early");
                removed += 1;
            }
        }
        last = now;
    }
    assert!(removed > 5);
}

#[test]
fn score_is_ten_per_successful_jump() {
    let mut s = started(invincible(), 21);
    let mut jumps = 0;
    let mut last_score = 0;
    for _ in 0..5_000 {
        s.tick(FRAME);
        if let Some((_, _, letter)) = nearest_in_window(&s) {
            if let KeyOutcome::Jumped { .. } = s.press_key(&letter.to_string()) {
                jumps += 1;
            }
        }
        assert!(s.score() >= last_score);
        last_score = s.score();
    }
    assert!(jumps > 0);
    assert_eq!(s.score(), jumps * 10);
}

#[test]
fn second_press_before_landing_is_a_noop() {
    let mut s = started(invincible(), 5);
    while nearest_in_window(&s).is_none() {
        s.tick(FRAME);
    }
    let (_, _, letter) = nearest_in_window(&s).unwrap();
    let key = letter.to_string();
    assert!(matches!(s.press_key(&key), KeyOutcome::Jumped { .. }));
    let vy = s.actor().vy;
    assert!(vy < 0.0 && s.actor().airborne);
    assert_eq!(s.press_key(&key), KeyOutcome::Airborne);
    assert_eq!(s.actor().vy, vy);
    assert_eq!(s.score(), 10);
}

#[test]
fn idle_runner_crashes_into_first_crate() {
    let mut s = started(RunnerConfig::default(), 1);
    for _ in 0..2_000 {
        s.tick(FRAME);
        if s.state() == SessionState::Ended {
            break;
        }
    }
    assert_eq!(s.state(), SessionState::Ended);
    assert_eq!(s.score(), 0);
    // Frozen after the crash.
    let before = s.snapshot();
    s.tick(0.1);
    let after = s.snapshot();
    assert_eq!(before.obstacles, after.obstacles);
}

#[test]
fn well_timed_typing_survives() {
    let mut s = started(RunnerConfig::default(), 99);
    let mut jumped: Vec<u64> = Vec::new();
    for _ in 0..(60 * 30) {
        s.tick(FRAME);
        assert_eq!(s.state(), SessionState::Running, "crashed with score {}", s.score());
        if let Some((id, x, letter)) = nearest_in_window(&s) {
            if x < 200.0 && !jumped.contains(&id) {
                assert!(matches!(s.press_key(&letter.to_string()), KeyOutcome::Jumped { .. }));
                jumped.push(id);
            }
        }
    }
    assert!(s.score() >= 100);
}

struct Cheerful;

impl CheerProvider for Cheerful {
    fn cheer(&mut self, score: u32, game: &str) -> Result<String, CollaboratorError> {
        Ok(format!("{score} in {game}! 🎉"))
    }
}

struct Offline;

impl CheerProvider for Offline {
    fn cheer(&mut self, _score: u32, _game: &str) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::Unavailable("timeout".into()))
    }
}

fn crashed(seed: u64) -> RunnerSession {
    let mut s = started(RunnerConfig::default(), seed);
    while s.state() == SessionState::Running {
        s.tick(FRAME);
    }
    s
}

#[test]
fn cheer_arrives_after_game_over() {
    let mut s = crashed(4);
    assert_eq!(s.snapshot().cheer, None);
    assert!(s.fulfil_cheer(&mut Cheerful));
    assert_eq!(s.cheer(), Some("0 in Letter Runner! 🎉"));
}

#[test]
fn failed_cheer_uses_default() {
    let mut s = crashed(4);
    s.fulfil_cheer(&mut Offline);
    assert_eq!(s.cheer(), Some(DEFAULT_CHEER));
}

#[test]
fn reset_then_start_begins_fresh() {
    let mut s = crashed(12);
    s.reset().unwrap();
    assert_eq!(s.state(), SessionState::NotStarted);
    assert!(s.obstacles().is_empty());
    assert_eq!(s.actor().y, 0.0);
    s.start().unwrap();
    assert_eq!(s.state(), SessionState::Running);
}
