//! Actor vs. obstacle overlap test.

use super::obstacles::Obstacle;
use super::physics::Actor;

/// Fixed horizontal footprints plus the height the actor must reach to clear a crate.
#[derive(Clone, Copy, Debug)]
pub struct Hitbox {
    pub actor_x: f64,
    pub actor_width: f64,
    pub obstacle_width: f64,
    /// Trimmed from both sides of the actor footprint.
    pub inset: f64,
    /// Actor `y` at or above which (more negative) it clears the crate.
    pub clearance: f64,
}

impl Hitbox {
    /// Horizontal ranges overlap, with the actor's forgiveness inset applied.
    pub fn overlaps_x(&self, obstacle_x: f64) -> bool {
        obstacle_x < self.actor_x + self.actor_width - self.inset
            && obstacle_x + self.obstacle_width > self.actor_x + self.inset
    }

    pub fn hits(&self, actor: &Actor, obstacle: &Obstacle) -> bool {
        self.overlaps_x(obstacle.x) && actor.y > self.clearance
    }

    /// True if any obstacle hits the actor.
    pub fn any_hit<'a>(&self, actor: &Actor, obstacles: impl IntoIterator<Item = &'a Obstacle>) -> bool {
        obstacles.into_iter().any(|o| self.hits(actor, o))
    }
}
