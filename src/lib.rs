//! Typing Adventures core crate.
//!
//! Game logic for a kids' typing trainer: a guided lesson mode plus two
//! minigames, Letter Runner (type the balloon letter to jump the crate) and
//! Bullseye Blitz (type the letters on the targets before time runs out).
//! Sessions are plain Rust state machines, testable natively; the `web`
//! module wires them to the browser frame loop and keyboard.

use wasm_bindgen::prelude::*;

pub mod bullseye;
pub mod clock;
pub mod collab;
pub mod config;
pub mod error;
pub mod keyboard;
pub mod lesson;
pub mod runner;
pub mod web;

pub use bullseye::BullseyeSession;
pub use clock::FrameClock;
pub use config::{BullseyeConfig, RunnerConfig};
pub use error::{CollaboratorError, ConfigError, SessionState, TransitionError};
pub use lesson::LessonSession;
pub use runner::RunnerSession;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    let _ = console_log::init_with_level(log::Level::Info);
}
