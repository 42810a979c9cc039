//! Tunable game constants.
//!
//! Defaults reproduce the shipped game feel (pixels and seconds, canvas
//! 800x450). The host can override any subset by passing a JSON object; missing
//! fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Letter Runner physics, spawning and input-window settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Downward acceleration (px/s^2).
    pub gravity: f64,
    /// Vertical velocity applied by a jump (px/s, negative = up).
    pub jump_impulse: f64,
    /// Horizontal obstacle speed (px/s), shared by all obstacles.
    pub scroll_speed: f64,
    pub spawn_min_secs: f64,
    pub spawn_max_secs: f64,
    /// Delay before the first obstacle of a session.
    pub first_spawn_secs: f64,
    /// Visible area width; obstacles spawn just past it.
    pub view_width: f64,
    /// Must lie beyond `view_width` so crates enter from off-screen.
    pub spawn_x: f64,
    pub despawn_x: f64,
    pub actor_x: f64,
    pub actor_width: f64,
    pub obstacle_width: f64,
    /// Forgiveness trimmed off both sides of the actor footprint.
    pub hitbox_inset: f64,
    /// The actor clears an obstacle only while `y <= clearance`.
    pub clearance: f64,
    /// Exclusive bounds of the band where a key press can target an obstacle.
    pub window_min: f64,
    pub window_max: f64,
    pub score_per_jump: u32,
    pub max_dt: f64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            gravity: 2500.0,
            jump_impulse: -900.0,
            scroll_speed: 350.0,
            spawn_min_secs: 1.2,
            spawn_max_secs: 2.5,
            first_spawn_secs: 1.0,
            view_width: 800.0,
            spawn_x: 850.0,
            despawn_x: -100.0,
            actor_x: 100.0,
            actor_width: 50.0,
            obstacle_width: 50.0,
            hitbox_inset: 10.0,
            clearance: -40.0,
            window_min: 50.0,
            window_max: 600.0,
            score_per_jump: 10,
            max_dt: crate::clock::DEFAULT_MAX_DT,
        }
    }
}

impl RunnerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jump_impulse >= 0.0 {
            return Err(invalid("jump_impulse", "must be negative (up)"));
        }
        if self.gravity <= 0.0 {
            return Err(invalid("gravity", "must be positive"));
        }
        if self.scroll_speed <= 0.0 {
            return Err(invalid("scroll_speed", "must be positive"));
        }
        if !(self.spawn_min_secs > 0.0 && self.spawn_min_secs <= self.spawn_max_secs) {
            return Err(invalid("spawn_min_secs", "must be positive and <= spawn_max_secs"));
        }
        if self.window_min >= self.window_max {
            return Err(invalid("window_min", "must be below window_max"));
        }
        if self.despawn_x >= self.spawn_x {
            return Err(invalid("despawn_x", "must be left of spawn_x"));
        }
        if self.view_width <= 0.0 {
            return Err(invalid("view_width", "must be positive"));
        }
        if self.spawn_x <= self.view_width {
            return Err(invalid("spawn_x", "must be right of view_width"));
        }
        if self.max_dt <= 0.0 {
            return Err(invalid("max_dt", "must be positive"));
        }
        Ok(())
    }
}

/// Bullseye Blitz round, spawn and scoring settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BullseyeConfig {
    pub round_secs: u32,
    pub spawn_interval_secs: f64,
    pub max_targets: usize,
    /// Chance of an additional spawn on each interval, regardless of the cap.
    pub extra_spawn_chance: f64,
    pub initial_targets: usize,
    pub hit_points: u32,
    pub miss_penalty: u32,
}

impl Default for BullseyeConfig {
    fn default() -> Self {
        Self {
            round_secs: 30,
            spawn_interval_secs: 1.2,
            max_targets: 5,
            extra_spawn_chance: 0.7,
            initial_targets: 2,
            hit_points: 10,
            miss_penalty: 2,
        }
    }
}

impl BullseyeConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.round_secs == 0 {
            return Err(invalid("round_secs", "must be at least one second"));
        }
        if self.spawn_interval_secs <= 0.0 {
            return Err(invalid("spawn_interval_secs", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.extra_spawn_chance) {
            return Err(invalid("extra_spawn_chance", "must be within 0..=1"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
