//! Bullseye Blitz: letter targets pop up around the screen for a timed round;
//! typing a letter hits the oldest target showing it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::collab::{CheerProvider, CheerRequest, CheerSlot, CollaboratorError};
use crate::config::BullseyeConfig;
use crate::error::{ConfigError, SessionState, TransitionError};

pub const GAME_NAME: &str = "Bullseye Blitz";

/// A target positioned in percent of the play area.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Target {
    pub id: u64,
    pub x: u8,
    pub y: u8,
    pub letter: char,
    /// Round time (seconds) at which the target appeared.
    pub created_at: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShotOutcome {
    Hit { target: u64 },
    Miss,
    Ignored,
}

#[derive(Clone, Debug, Serialize)]
pub struct BullseyeSnapshot {
    pub state: SessionState,
    pub score: u32,
    pub time_left: u32,
    pub targets: Vec<Target>,
    pub last_typed: Option<char>,
    pub cheer: Option<String>,
}

pub struct BullseyeSession {
    config: BullseyeConfig,
    state: SessionState,
    targets: Vec<Target>,
    score: u32,
    time_left: u32,
    elapsed: f64,
    second_acc: f64,
    spawn_acc: f64,
    last_typed: Option<char>,
    next_id: u64,
    rng: StdRng,
    cheer: CheerSlot,
    next_token: u64,
}

impl BullseyeSession {
    pub fn new(config: BullseyeConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_seed(config: BullseyeConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: BullseyeConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let time_left = config.round_secs;
        Ok(Self {
            config,
            state: SessionState::NotStarted,
            targets: Vec::new(),
            score: 0,
            time_left,
            elapsed: 0.0,
            second_acc: 0.0,
            spawn_acc: 0.0,
            last_typed: None,
            next_id: 1,
            rng,
            cheer: CheerSlot::default(),
            next_token: 1,
        })
    }

    /// Begin the round with the opening targets already on screen.
    pub fn start(&mut self) -> Result<(), TransitionError> {
        self.begin("start", self.config.initial_targets)
    }

    fn begin(&mut self, action: &'static str, opening: usize) -> Result<(), TransitionError> {
        if self.state != SessionState::NotStarted {
            return Err(TransitionError {
                from: self.state,
                action,
            });
        }
        self.state = SessionState::Running;
        for _ in 0..opening {
            self.spawn();
        }
        log::info!("{GAME_NAME}: round started ({}s)", self.config.round_secs);
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), TransitionError> {
        if self.state != SessionState::Ended {
            return Err(TransitionError {
                from: self.state,
                action: "reset",
            });
        }
        self.state = SessionState::NotStarted;
        self.targets.clear();
        self.score = 0;
        self.time_left = self.config.round_secs;
        self.elapsed = 0.0;
        self.second_acc = 0.0;
        self.spawn_acc = 0.0;
        self.last_typed = None;
        self.cheer.clear();
        Ok(())
    }

    /// Replay from the results screen. The new round opens on an empty board;
    /// targets arrive with the spawn interval.
    pub fn play_again(&mut self) -> Result<(), TransitionError> {
        self.reset()?;
        self.begin("play again", 0)
    }

    /// Advance round time: whole-second countdown and the spawn interval.
    pub fn tick(&mut self, dt: f64) {
        if self.state != SessionState::Running || dt <= 0.0 {
            return;
        }
        self.elapsed += dt;

        self.spawn_acc += dt;
        while self.spawn_acc >= self.config.spawn_interval_secs {
            self.spawn_acc -= self.config.spawn_interval_secs;
            if self.targets.len() < self.config.max_targets {
                self.spawn();
            }
            if self.rng.gen_bool(self.config.extra_spawn_chance) {
                self.spawn();
            }
        }

        self.second_acc += dt;
        while self.second_acc >= 1.0 && self.state == SessionState::Running {
            self.second_acc -= 1.0;
            self.time_left = self.time_left.saturating_sub(1);
            if self.time_left == 0 {
                self.end();
            }
        }
    }

    fn spawn(&mut self) {
        let target = Target {
            id: self.next_id,
            x: self.rng.gen_range(10..90),
            y: self.rng.gen_range(15..85),
            letter: char::from(b'a' + self.rng.gen_range(0..26u8)),
            created_at: self.elapsed,
        };
        self.next_id += 1;
        self.targets.push(target);
    }

    fn end(&mut self) {
        self.state = SessionState::Ended;
        let token = self.next_token;
        self.next_token += 1;
        self.cheer.request(token, self.score, GAME_NAME);
        log::info!("{GAME_NAME}: time up with score {}", self.score);
    }

    /// A hit clears the oldest matching target; a miss costs points, never below zero.
    pub fn press_key(&mut self, key: &str) -> ShotOutcome {
        if self.state != SessionState::Running {
            return ShotOutcome::Ignored;
        }
        let Some(letter) = crate::runner::key_letter(key).filter(char::is_ascii_lowercase) else {
            return ShotOutcome::Ignored;
        };
        self.last_typed = Some(letter);
        match self.targets.iter().position(|t| t.letter == letter) {
            Some(idx) => {
                let target = self.targets.remove(idx);
                self.score += self.config.hit_points;
                ShotOutcome::Hit { target: target.id }
            }
            None => {
                self.score = self.score.saturating_sub(self.config.miss_penalty);
                ShotOutcome::Miss
            }
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn take_cheer_request(&mut self) -> Option<CheerRequest> {
        self.cheer.take_request()
    }

    pub fn deliver_cheer(&mut self, token: u64, outcome: Result<String, CollaboratorError>) -> bool {
        self.cheer.deliver(token, outcome)
    }

    pub fn fulfil_cheer(&mut self, provider: &mut impl CheerProvider) -> bool {
        self.cheer.fulfil_with(provider)
    }

    pub fn cheer(&self) -> Option<&str> {
        self.cheer.text()
    }

    pub fn snapshot(&self) -> BullseyeSnapshot {
        BullseyeSnapshot {
            state: self.state,
            score: self.score,
            time_left: self.time_left,
            targets: self.targets.clone(),
            last_typed: self.last_typed,
            cheer: self.cheer.text().map(str::to_string),
        }
    }

    #[cfg(test)]
    fn place(&mut self, letter: char) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.targets.push(Target {
            id,
            x: 50,
            y: 50,
            letter,
            created_at: self.elapsed,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> BullseyeConfig {
        BullseyeConfig {
            initial_targets: 0,
            extra_spawn_chance: 0.0,
            ..BullseyeConfig::default()
        }
    }

    fn started(config: BullseyeConfig) -> BullseyeSession {
        let mut s = BullseyeSession::with_seed(config, 11).unwrap();
        s.start().unwrap();
        s
    }

    #[test]
    fn start_places_opening_targets() {
        let s = started(BullseyeConfig::default());
        assert_eq!(s.targets().len(), 2);
        for t in s.targets() {
            assert!((10..90).contains(&t.x));
            assert!((15..85).contains(&t.y));
            assert!(t.letter.is_ascii_lowercase());
        }
    }

    #[test]
    fn hit_removes_oldest_matching_target() {
        let mut s = started(quiet_config());
        let first = s.place('k');
        let second = s.place('k');
        assert_eq!(s.press_key("K"), ShotOutcome::Hit { target: first });
        assert_eq!(s.score(), 10);
        assert_eq!(s.targets().len(), 1);
        assert_eq!(s.targets()[0].id, second);
    }

    #[test]
    fn miss_penalty_floors_at_zero() {
        let mut s = started(quiet_config());
        assert_eq!(s.press_key("q"), ShotOutcome::Miss);
        assert_eq!(s.score(), 0);
        s.place('a');
        s.press_key("a");
        s.press_key("b");
        assert_eq!(s.score(), 8);
    }

    #[test]
    fn non_letters_are_ignored() {
        let mut s = started(quiet_config());
        s.place('a');
        s.press_key("a");
        assert_eq!(s.press_key("Enter"), ShotOutcome::Ignored);
        assert_eq!(s.press_key("7"), ShotOutcome::Ignored);
        assert_eq!(s.score(), 10);
        assert_eq!(s.snapshot().last_typed, Some('a'));
    }

    #[test]
    fn spawns_respect_cap_without_extra_chance() {
        let mut s = started(quiet_config());
        for _ in 0..20 {
            s.tick(0.6);
        }
        assert_eq!(s.targets().len(), 5);
    }

    #[test]
    fn extra_spawns_can_exceed_cap() {
        let config = BullseyeConfig {
            extra_spawn_chance: 1.0,
            ..BullseyeConfig::default()
        };
        let mut s = started(config);
        for _ in 0..10 {
            s.tick(0.6);
        }
        assert!(s.targets().len() > 5);
    }

    #[test]
    fn round_ends_when_time_runs_out() {
        let mut s = started(quiet_config());
        for _ in 0..299 {
            s.tick(0.1);
        }
        assert_eq!(s.state(), SessionState::Running);
        s.tick(0.1);
        s.tick(0.1);
        assert_eq!(s.state(), SessionState::Ended);
        assert_eq!(s.time_left(), 0);
        assert_eq!(s.press_key("a"), ShotOutcome::Ignored);
        let req = s.take_cheer_request().unwrap();
        assert_eq!(req.game, GAME_NAME);
    }

    #[test]
    fn play_again_restores_round() {
        let mut s = started(quiet_config());
        s.tick(31.0);
        assert_eq!(s.state(), SessionState::Ended);
        s.play_again().unwrap();
        assert_eq!(s.state(), SessionState::Running);
        assert_eq!(s.time_left(), 30);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn play_again_opens_on_empty_board() {
        let mut s = started(BullseyeConfig::default());
        assert_eq!(s.targets().len(), 2);
        s.tick(31.0);
        s.play_again().unwrap();
        assert!(s.targets().is_empty());
        s.tick(1.3);
        assert!(!s.targets().is_empty());
    }

    #[test]
    fn extra_spawn_chance_above_one_is_rejected() {
        let config = BullseyeConfig {
            extra_spawn_chance: 1.5,
            ..BullseyeConfig::default()
        };
        assert!(matches!(
            BullseyeSession::with_seed(config, 3),
            Err(ConfigError::Invalid { field: "extra_spawn_chance", .. })
        ));
    }

    #[test]
    fn zero_spawn_interval_is_rejected() {
        for interval in [0.0, -0.5] {
            let config = BullseyeConfig {
                spawn_interval_secs: interval,
                ..BullseyeConfig::default()
            };
            assert!(matches!(
                BullseyeSession::new(config),
                Err(ConfigError::Invalid { field: "spawn_interval_secs", .. })
            ));
        }
    }
}
