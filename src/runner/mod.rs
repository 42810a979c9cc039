//! Letter Runner: a side-scroller where typing the letter on the next balloon
//! makes the runner jump its crate.
//!
//! A session owns all mutable simulation state. The frame loop calls [`RunnerSession::tick`]
//! and the keyboard listener calls [`RunnerSession::press_key`]; both take
//! `&mut self`, so a key press is always fully applied before the next step
//! reads the actor's velocity.
//!
//! Step order: actor physics, scroll offsets, spawn countdown, then obstacle
//! scroll/despawn and the collision check. A collision ends the session and
//! queues a cheer request for the host.

pub mod collision;
pub mod input;
pub mod obstacles;
pub mod physics;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::collab::{CheerProvider, CheerRequest, CheerSlot, CollaboratorError};
use crate::config::RunnerConfig;
use crate::error::{ConfigError, SessionState, TransitionError};

pub use collision::Hitbox;
pub use input::{KeyOutcome, key_letter};
pub use obstacles::{Obstacle, ObstacleStream, StreamParams};
pub use physics::Actor;

pub const GAME_NAME: &str = "Letter Runner";

/// Background scroll positions, each wrapped to the view width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ScrollOffsets {
    pub ground: f64,
    pub far: f64,
    pub near: f64,
}

const FAR_PARALLAX: f64 = 0.2;
const NEAR_PARALLAX: f64 = 0.5;

impl ScrollOffsets {
    fn advance(&mut self, distance: f64, wrap: f64) {
        self.ground = (self.ground + distance) % wrap;
        self.far = (self.far + distance * FAR_PARALLAX) % wrap;
        self.near = (self.near + distance * NEAR_PARALLAX) % wrap;
    }
}

/// Read-only view handed to the renderer each frame.
#[derive(Clone, Debug, Serialize)]
pub struct RunnerSnapshot {
    pub state: SessionState,
    pub score: u32,
    pub actor_y: f64,
    pub airborne: bool,
    /// Sorted by `x`, nearest first.
    pub obstacles: Vec<Obstacle>,
    pub scroll: ScrollOffsets,
    pub cheer: Option<String>,
}

pub struct RunnerSession {
    config: RunnerConfig,
    state: SessionState,
    actor: Actor,
    stream: ObstacleStream,
    score: u32,
    scroll: ScrollOffsets,
    rng: StdRng,
    cheer: CheerSlot,
    next_token: u64,
}

impl RunnerSession {
    /// New session seeded from OS / browser entropy. Rejects configs that
    /// fail [`RunnerConfig::validate`].
    pub fn new(config: RunnerConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic session for tests and replays.
    pub fn with_seed(config: RunnerConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: RunnerConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let stream = ObstacleStream::new(stream_params(&config), config.first_spawn_secs);
        Ok(Self {
            config,
            state: SessionState::NotStarted,
            actor: Actor::grounded(),
            stream,
            score: 0,
            scroll: ScrollOffsets::default(),
            rng,
            cheer: CheerSlot::default(),
            next_token: 1,
        })
    }

    pub fn start(&mut self) -> Result<(), TransitionError> {
        self.transition(SessionState::NotStarted, SessionState::Running, "start")?;
        log::info!("{GAME_NAME}: run started");
        Ok(())
    }

    /// Clear the finished run back to `NotStarted`. Any cheer still in flight
    /// for the old run is dropped when it arrives.
    pub fn reset(&mut self) -> Result<(), TransitionError> {
        self.transition(SessionState::Ended, SessionState::NotStarted, "reset")?;
        self.actor = Actor::grounded();
        self.stream = ObstacleStream::new(stream_params(&self.config), self.config.first_spawn_secs);
        self.score = 0;
        self.scroll = ScrollOffsets::default();
        self.cheer.clear();
        Ok(())
    }

    /// The "Play Again" button: reset a finished run and start the next one.
    pub fn play_again(&mut self) -> Result<(), TransitionError> {
        self.reset()?;
        self.start()
    }

    fn transition(
        &mut self,
        from: SessionState,
        to: SessionState,
        action: &'static str,
    ) -> Result<(), TransitionError> {
        if self.state != from {
            return Err(TransitionError {
                from: self.state,
                action,
            });
        }
        self.state = to;
        Ok(())
    }

    /// Advance the simulation by `dt` seconds (clamped to the configured maximum).
    pub fn tick(&mut self, dt: f64) {
        if self.state != SessionState::Running {
            return;
        }
        let dt = dt.clamp(0.0, self.config.max_dt);

        self.actor.integrate(dt, self.config.gravity);
        self.scroll
            .advance(self.config.scroll_speed * dt, self.config.view_width);
        self.stream.update_spawn(dt, &mut self.rng);
        self.stream.advance(dt);

        if self.hitbox().any_hit(&self.actor, self.stream.obstacles()) {
            self.end();
        }
    }

    fn end(&mut self) {
        self.state = SessionState::Ended;
        let token = self.next_token;
        self.next_token += 1;
        self.cheer.request(token, self.score, GAME_NAME);
        log::info!("{GAME_NAME}: run over with score {}", self.score);
    }

    /// Handle a host key name. Non-letters and presses outside a running
    /// session are ignored.
    pub fn press_key(&mut self, key: &str) -> KeyOutcome {
        if self.state != SessionState::Running {
            return KeyOutcome::Ignored;
        }
        let Some(letter) = key_letter(key) else {
            return KeyOutcome::Ignored;
        };
        let outcome = input::route_key(
            letter,
            &mut self.actor,
            &self.stream,
            (self.config.window_min, self.config.window_max),
            self.config.jump_impulse,
        );
        if let KeyOutcome::Jumped { .. } = outcome {
            self.score += self.config.score_per_jump;
        }
        outcome
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox {
            actor_x: self.config.actor_x,
            actor_width: self.config.actor_width,
            obstacle_width: self.config.obstacle_width,
            inset: self.config.hitbox_inset,
            clearance: self.config.clearance,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.stream.obstacles()
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
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

    pub fn snapshot(&self) -> RunnerSnapshot {
        let mut obstacles = self.stream.obstacles().to_vec();
        obstacles.sort_by(|a, b| a.x.total_cmp(&b.x));
        RunnerSnapshot {
            state: self.state,
            score: self.score,
            actor_y: self.actor.y,
            airborne: self.actor.airborne,
            obstacles,
            scroll: self.scroll,
            cheer: self.cheer.text().map(str::to_string),
        }
    }

    #[cfg(test)]
    pub(crate) fn stream_mut(&mut self) -> &mut ObstacleStream {
        &mut self.stream
    }
}

fn stream_params(config: &RunnerConfig) -> StreamParams {
    StreamParams {
        speed: config.scroll_speed,
        spawn_x: config.spawn_x,
        despawn_x: config.despawn_x,
        spawn_min: config.spawn_min_secs,
        spawn_max: config.spawn_max_secs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> RunnerSession {
        let mut s = RunnerSession::with_seed(RunnerConfig::default(), 42).unwrap();
        s.start().unwrap();
        s
    }

    #[test]
    fn tick_before_start_does_nothing() {
        let mut s = RunnerSession::with_seed(RunnerConfig::default(), 1).unwrap();
        for _ in 0..100 {
            s.tick(0.1);
        }
        assert!(s.obstacles().is_empty());
        assert_eq!(s.state(), SessionState::NotStarted);
    }

    #[test]
    fn inverted_spawn_range_is_rejected() {
        let config = RunnerConfig {
            spawn_min_secs: 3.0,
            spawn_max_secs: 1.0,
            ..RunnerConfig::default()
        };
        assert!(matches!(
            RunnerSession::with_seed(config, 1),
            Err(ConfigError::Invalid { field: "spawn_min_secs", .. })
        ));
    }

    #[test]
    fn negative_max_dt_is_rejected() {
        let config = RunnerConfig {
            max_dt: -1.0,
            ..RunnerConfig::default()
        };
        assert!(matches!(
            RunnerSession::new(config),
            Err(ConfigError::Invalid { field: "max_dt", .. })
        ));
    }

    #[test]
    fn only_listed_transitions_allowed() {
        let mut s = RunnerSession::with_seed(RunnerConfig::default(), 1).unwrap();
        assert_eq!(
            s.reset(),
            Err(TransitionError { from: SessionState::NotStarted, action: "reset" })
        );
        s.start().unwrap();
        assert!(s.start().is_err());
        assert!(s.reset().is_err());
        assert_eq!(s.state(), SessionState::Running);
    }

    #[test]
    fn matching_key_scores_and_jumps_once() {
        let mut s = running();
        s.stream_mut().push_at(400.0, 'g');
        assert!(matches!(s.press_key("G"), KeyOutcome::Jumped { .. }));
        assert_eq!(s.score(), 10);
        assert_eq!(s.press_key("g"), KeyOutcome::Airborne);
        assert_eq!(s.score(), 10);
    }

    #[test]
    fn wrong_letter_changes_nothing() {
        let mut s = running();
        s.stream_mut().push_at(400.0, 'g');
        assert_eq!(s.press_key("h"), KeyOutcome::WrongLetter);
        assert_eq!(s.score(), 0);
        assert!(s.actor().is_grounded());
    }

    #[test]
    fn collision_ends_run_and_requests_cheer() {
        let mut s = running();
        s.stream_mut().push_at(125.0, 'z');
        s.tick(0.01);
        assert_eq!(s.state(), SessionState::Ended);
        let req = s.take_cheer_request().unwrap();
        assert_eq!(req.game, GAME_NAME);
        assert!(s.take_cheer_request().is_none());
        assert!(s.deliver_cheer(req.token, Err(CollaboratorError::EmptyResponse)));
        assert_eq!(s.cheer(), Some(crate::collab::DEFAULT_CHEER));
    }

    #[test]
    fn ended_session_is_frozen() {
        let mut s = running();
        s.stream_mut().push_at(125.0, 'z');
        s.tick(0.01);
        let xs: Vec<f64> = s.obstacles().iter().map(|o| o.x).collect();
        s.tick(0.1);
        assert_eq!(s.press_key("z"), KeyOutcome::Ignored);
        let after: Vec<f64> = s.obstacles().iter().map(|o| o.x).collect();
        assert_eq!(xs, after);
    }

    #[test]
    fn stale_cheer_after_reset_is_dropped() {
        let mut s = running();
        s.stream_mut().push_at(125.0, 'z');
        s.tick(0.01);
        let req = s.take_cheer_request().unwrap();
        s.play_again().unwrap();
        assert!(!s.deliver_cheer(req.token, Ok("late".into())));
        assert_eq!(s.cheer(), None);
        assert_eq!(s.score(), 0);
        assert!(s.obstacles().is_empty());
    }

    #[test]
    fn scroll_offsets_wrap() {
        let mut s = running();
        for _ in 0..40 {
            s.tick(0.1);
            if s.state() != SessionState::Running {
                break;
            }
        }
        let snap = s.snapshot();
        for offset in [snap.scroll.ground, snap.scroll.far, snap.scroll.near] {
            assert!((0.0..800.0).contains(&offset), "offset {offset}");
        }
        assert!(snap.scroll.ground > 0.0);
    }

    #[test]
    fn snapshot_sorts_obstacles() {
        let mut s = running();
        s.stream_mut().push_at(500.0, 'a');
        s.stream_mut().push_at(300.0, 'b');
        let snap = s.snapshot();
        assert_eq!(snap.obstacles[0].letter, 'b');
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["state"], "running");
    }
}
