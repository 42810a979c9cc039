//! Browser glue: the frame loop, the keyboard listener and the JS-facing API.
//!
//! One game is active at a time and lives in a thread-local slot. The page
//! draws from the JSON snapshot each frame, polls for collaborator requests,
//! performs the network calls itself and hands the answers back.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::bullseye::BullseyeSession;
use crate::clock::FrameClock;
use crate::collab::{CollaboratorError, prompts};
use crate::config::{BullseyeConfig, RunnerConfig};
use crate::lesson::LessonSession;
use crate::runner::RunnerSession;

enum ActiveGame {
    Runner(RunnerSession),
    Bullseye(BullseyeSession),
    Lesson(LessonSession),
}

struct WebState {
    game: ActiveGame,
    clock: FrameClock,
}

thread_local! {
    static WEB_STATE: RefCell<Option<WebState>> = const { RefCell::new(None) };
    static LOOP_STARTED: Cell<bool> = const { Cell::new(false) };
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn install(game: ActiveGame, max_dt: f64) -> Result<(), JsValue> {
    WEB_STATE.with(|cell| {
        cell.replace(Some(WebState {
            game,
            clock: FrameClock::new(max_dt),
        }))
    });
    if !LOOP_STARTED.with(|s| s.replace(true)) {
        install_key_listener()?;
        start_frame_loop();
    }
    Ok(())
}

fn with_state<T>(f: impl FnOnce(&mut WebState) -> T) -> Option<T> {
    WEB_STATE.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn install_key_listener() -> Result<(), JsValue> {
    let doc = window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        let key = evt.key();
        with_state(|state| match &mut state.game {
            ActiveGame::Runner(s) => {
                s.press_key(&key);
            }
            ActiveGame::Bullseye(s) => {
                s.press_key(&key);
            }
            ActiveGame::Lesson(s) => {
                s.press_key(&key);
            }
        });
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        with_state(|state| {
            let dt = state.clock.tick(ts);
            match &mut state.game {
                ActiveGame::Runner(s) => s.tick(dt),
                ActiveGame::Bullseye(s) => s.tick(dt),
                ActiveGame::Lesson(_) => {}
            }
        });
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

// --- Game selection ----------------------------------------------------------

/// Open Letter Runner on its start screen. `config_json` overrides defaults.
#[wasm_bindgen]
pub fn open_runner(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json {
        Some(json) => RunnerConfig::from_json(&json).map_err(js_err)?,
        None => RunnerConfig::default(),
    };
    let max_dt = config.max_dt;
    let session = RunnerSession::new(config).map_err(js_err)?;
    install(ActiveGame::Runner(session), max_dt)
}

/// Open Bullseye Blitz; the round starts immediately.
#[wasm_bindgen]
pub fn open_bullseye(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json {
        Some(json) => BullseyeConfig::from_json(&json).map_err(js_err)?,
        None => BullseyeConfig::default(),
    };
    let mut session = BullseyeSession::new(config).map_err(js_err)?;
    session.start().map_err(js_err)?;
    install(ActiveGame::Bullseye(session), crate::clock::DEFAULT_MAX_DT)
}

#[wasm_bindgen]
pub fn open_lesson(index: usize) -> Result<(), JsValue> {
    install(
        ActiveGame::Lesson(LessonSession::new(index)),
        crate::clock::DEFAULT_MAX_DT,
    )
}

/// Back to the menu: drop the active game.
#[wasm_bindgen]
pub fn close_game() {
    WEB_STATE.with(|cell| cell.replace(None));
}

// --- Lifecycle ----------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    with_state(|state| {
        state.clock.reset();
        match &mut state.game {
            ActiveGame::Runner(s) => s.start().map_err(js_err),
            ActiveGame::Bullseye(s) => s.start().map_err(js_err),
            ActiveGame::Lesson(_) => Ok(()),
        }
    })
    .unwrap_or_else(|| Err(JsValue::from_str("no active game")))
}

#[wasm_bindgen]
pub fn play_again() -> Result<(), JsValue> {
    with_state(|state| {
        state.clock.reset();
        match &mut state.game {
            ActiveGame::Runner(s) => s.play_again().map_err(js_err),
            ActiveGame::Bullseye(s) => s.play_again().map_err(js_err),
            ActiveGame::Lesson(s) => {
                s.restart();
                Ok(())
            }
        }
    })
    .unwrap_or_else(|| Err(JsValue::from_str("no active game")))
}

#[wasm_bindgen]
pub fn lesson_select(index: usize) -> bool {
    with_state(|state| match &mut state.game {
        ActiveGame::Lesson(s) => s.select(index),
        _ => false,
    })
    .unwrap_or(false)
}

#[wasm_bindgen]
pub fn lesson_next() -> bool {
    with_state(|state| match &mut state.game {
        ActiveGame::Lesson(s) => s.next_lesson(),
        _ => false,
    })
    .unwrap_or(false)
}

#[wasm_bindgen]
pub fn lesson_previous() -> bool {
    with_state(|state| match &mut state.game {
        ActiveGame::Lesson(s) => s.previous_lesson(),
        _ => false,
    })
    .unwrap_or(false)
}

// --- Render surface -----------------------------------------------------------

/// JSON snapshot of the active game for the page to draw, or `null` on the menu.
#[wasm_bindgen]
pub fn snapshot() -> Result<Option<String>, JsValue> {
    with_state(|state| match &state.game {
        ActiveGame::Runner(s) => serde_json::to_string(&s.snapshot()),
        ActiveGame::Bullseye(s) => serde_json::to_string(&s.snapshot()),
        ActiveGame::Lesson(s) => serde_json::to_string(&s.snapshot()),
    })
    .transpose()
    .map_err(js_err)
}

// --- Collaborators ------------------------------------------------------------

/// Next outstanding collaborator request as JSON (`{"kind": "cheer" | "words", ...}`),
/// handed out once.
#[wasm_bindgen]
pub fn take_request() -> Result<Option<String>, JsValue> {
    let json = with_state(|state| match &mut state.game {
        ActiveGame::Runner(s) => s
            .take_cheer_request()
            .map(|r| serde_json::json!({ "kind": "cheer", "request": r })),
        ActiveGame::Bullseye(s) => s
            .take_cheer_request()
            .map(|r| serde_json::json!({ "kind": "cheer", "request": r })),
        ActiveGame::Lesson(s) => s
            .take_words_request()
            .map(|r| serde_json::json!({ "kind": "words", "request": r })),
    })
    .flatten();
    json.map(|v| serde_json::to_string(&v)).transpose().map_err(js_err)
}

/// Answer a cheer request. `None` reports that the call failed.
#[wasm_bindgen]
pub fn deliver_cheer(token: u32, text: Option<String>) -> bool {
    let outcome = text.ok_or_else(|| CollaboratorError::Unavailable("cheer request failed".into()));
    with_state(|state| match &mut state.game {
        ActiveGame::Runner(s) => s.deliver_cheer(u64::from(token), outcome),
        ActiveGame::Bullseye(s) => s.deliver_cheer(u64::from(token), outcome),
        ActiveGame::Lesson(_) => false,
    })
    .unwrap_or(false)
}

/// Answer a practice-words request with the raw JSON array text, or `None` on failure.
#[wasm_bindgen]
pub fn deliver_words(token: u32, json: Option<String>) -> bool {
    let outcome = match json {
        Some(text) => prompts::parse_word_list(&text),
        None => Err(CollaboratorError::Unavailable("words request failed".into())),
    };
    with_state(|state| match &mut state.game {
        ActiveGame::Lesson(s) => s.deliver_words(u64::from(token), outcome),
        _ => false,
    })
    .unwrap_or(false)
}
