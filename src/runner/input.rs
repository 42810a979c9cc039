//! Key press -> jump routing.

use super::obstacles::ObstacleStream;
use super::physics::Actor;

/// What a key press did to the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Matched the nearest actionable obstacle and launched the actor.
    Jumped { obstacle: u64 },
    /// Matched, but the actor is already in the air.
    Airborne,
    /// Nearest actionable obstacle carries another letter.
    WrongLetter,
    /// Nothing inside the actionable window.
    NoTarget,
    /// Not a single letter key, or the session is not running.
    Ignored,
}

/// Normalise a host key name ("a", "A", "Shift", ...) to a single lowercase letter.
pub fn key_letter(key: &str) -> Option<char> {
    let mut chars = key.chars();
    let c = chars.next()?;
    if chars.next().is_some() || !c.is_alphabetic() {
        return None;
    }
    c.to_lowercase().next()
}

/// Jump over the nearest obstacle in `(window_min, window_max)` if `letter` matches it.
pub fn route_key(
    letter: char,
    actor: &mut Actor,
    stream: &ObstacleStream,
    window: (f64, f64),
    impulse: f64,
) -> KeyOutcome {
    let Some(target) = stream.nearest_within(window.0, window.1) else {
        return KeyOutcome::NoTarget;
    };
    if target.letter != letter {
        return KeyOutcome::WrongLetter;
    }
    if actor.jump(impulse) {
        KeyOutcome::Jumped { obstacle: target.id }
    } else {
        KeyOutcome::Airborne
    }
}
