//! Vertical motion of the runner actor.

/// The player-controlled runner. `y` is the offset above the ground line in
/// screen orientation: `0.0` is grounded, negative values are in the air.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Actor {
    pub y: f64,
    pub vy: f64,
    pub airborne: bool,
}

impl Actor {
    pub fn grounded() -> Self {
        Self::default()
    }

    /// Advance one step under constant `gravity`. Landing snaps back to the
    /// ground line, so `y` never ends a step below it.
    pub fn integrate(&mut self, dt: f64, gravity: f64) {
        self.vy += gravity * dt;
        self.y += self.vy * dt;
        if self.y > 0.0 {
            self.y = 0.0;
            self.vy = 0.0;
            self.airborne = false;
        }
    }

    /// Launch with `impulse` (negative = up). No double jumps.
    pub fn jump(&mut self, impulse: f64) -> bool {
        if self.airborne {
            return false;
        }
        self.vy = impulse;
        self.airborne = true;
        true
    }

    pub fn is_grounded(&self) -> bool {
        !self.airborne
    }
}
