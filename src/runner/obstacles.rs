//! Timed obstacle spawning and scrolling.

use rand::Rng;
use serde::Serialize;

/// A crate with a letter balloon. `x` is the left edge in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Obstacle {
    pub id: u64,
    pub x: f64,
    pub letter: char,
}

/// Spawn timing and scroll parameters, copied out of the runner config.
#[derive(Clone, Copy, Debug)]
pub struct StreamParams {
    pub speed: f64,
    pub spawn_x: f64,
    pub despawn_x: f64,
    pub spawn_min: f64,
    pub spawn_max: f64,
}

#[derive(Clone, Debug)]
pub struct ObstacleStream {
    params: StreamParams,
    obstacles: Vec<Obstacle>,
    since_spawn: f64,
    next_spawn: f64,
    next_id: u64,
}

impl ObstacleStream {
    pub fn new(params: StreamParams, first_spawn: f64) -> Self {
        Self {
            params,
            obstacles: Vec::new(),
            since_spawn: 0.0,
            next_spawn: first_spawn,
            next_id: 1,
        }
    }

    /// Count down to the next spawn and emit at most one obstacle.
    pub fn update_spawn<R: Rng + ?Sized>(&mut self, dt: f64, rng: &mut R) -> Option<u64> {
        self.since_spawn += dt;
        if self.since_spawn <= self.next_spawn {
            return None;
        }
        let letter = char::from(b'a' + rng.gen_range(0..26u8));
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            x: self.params.spawn_x,
            letter,
        });
        self.since_spawn = 0.0;
        self.next_spawn = rng.gen_range(self.params.spawn_min..=self.params.spawn_max);
        log::debug!("spawned obstacle {id} '{letter}', next in {:.2}s", self.next_spawn);
        Some(id)
    }

    /// Scroll every obstacle left and drop the ones past the despawn line.
    /// Returns how many were dropped.
    pub fn advance(&mut self, dt: f64) -> usize {
        let step = self.params.speed * dt;
        let before = self.obstacles.len();
        let despawn_x = self.params.despawn_x;
        self.obstacles.retain_mut(|o| {
            o.x -= step;
            o.x >= despawn_x
        });
        before - self.obstacles.len()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Nearest obstacle strictly inside `(min, max)`.
    pub fn nearest_within(&self, min: f64, max: f64) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .filter(|o| o.x > min && o.x < max)
            .min_by(|a, b| a.x.total_cmp(&b.x))
    }

    #[cfg(test)]
    pub(crate) fn push_at(&mut self, x: f64, letter: char) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle { id, x, letter });
        id
    }
}
