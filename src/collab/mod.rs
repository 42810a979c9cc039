//! Generative-text collaborators (cheers and practice words).
//!
//! The network call itself lives in the host page. Game sessions only see a
//! request token going out and a `Result` coming back; every failure path is
//! replaced with a fixed fallback here so a session never waits on, or fails
//! because of, a collaborator.

pub mod prompts;

use serde::Serialize;

pub use crate::error::CollaboratorError;

/// Substituted when the cheer call fails.
pub const DEFAULT_CHEER: &str = "Awesome job! Keep practicing! 🚀";
/// Substituted when the cheer call succeeds with no text.
pub const EMPTY_CHEER: &str = "Great job! You are a typing superstar! 🌟";

/// Produces a short celebratory line for a finished game.
pub trait CheerProvider {
    fn cheer(&mut self, score: u32, game: &str) -> Result<String, CollaboratorError>;
}

/// Produces short lowercase practice words built from `allowed`, favouring `focus`.
pub trait PracticeTextProvider {
    fn practice_words(
        &mut self,
        allowed: &[char],
        focus: &[char],
    ) -> Result<Vec<String>, CollaboratorError>;
}

/// Collapse a cheer outcome into display text.
pub fn cheer_or_default(outcome: Result<String, CollaboratorError>) -> String {
    match outcome {
        Ok(text) if text.trim().is_empty() => EMPTY_CHEER.to_string(),
        Ok(text) => text,
        Err(e) => {
            log::warn!("cheer provider failed: {e}");
            DEFAULT_CHEER.to_string()
        }
    }
}

/// Collapse a practice-words outcome into a word list; failures become empty,
/// which callers treat as "use the fallback text".
pub fn words_or_empty(outcome: Result<Vec<String>, CollaboratorError>) -> Vec<String> {
    outcome.unwrap_or_else(|e| {
        log::warn!("practice word provider failed: {e}");
        Vec::new()
    })
}

/// Outbound cheer request, handed to the host as JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheerRequest {
    pub token: u64,
    pub score: u32,
    pub game: &'static str,
    pub prompt: String,
}

/// A value that an outside collaborator fills in at some later frame.
///
/// The token ties an answer to the request that produced it: after a reset the
/// slot holds a newer token (or none), and the late answer is dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Deferred<T> {
    #[default]
    Idle,
    Pending {
        token: u64,
        dispatched: bool,
    },
    Ready(T),
}

impl<T> Deferred<T> {
    pub fn request(&mut self, token: u64) {
        *self = Deferred::Pending {
            token,
            dispatched: false,
        };
    }

    /// Hand out the pending token once; later calls return `None` until a new request.
    pub fn dispatch(&mut self) -> Option<u64> {
        match self {
            Deferred::Pending { token, dispatched } if !*dispatched => {
                *dispatched = true;
                Some(*token)
            }
            _ => None,
        }
    }

    pub fn pending_token(&self) -> Option<u64> {
        match self {
            Deferred::Pending { token, .. } => Some(*token),
            _ => None,
        }
    }

    /// Store `value` if `token` matches the outstanding request. Returns whether it was applied.
    pub fn resolve(&mut self, token: u64, value: T) -> bool {
        if self.pending_token() == Some(token) {
            *self = Deferred::Ready(value);
            true
        } else {
            log::debug!("dropping stale collaborator answer (token {token})");
            false
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Deferred::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Deferred::Pending { .. })
    }

    pub fn clear(&mut self) {
        *self = Deferred::Idle;
    }
}

/// Cheer bookkeeping shared by the minigames: one request per finished round.
#[derive(Clone, Debug, Default)]
pub struct CheerSlot {
    slot: Deferred<String>,
    score: u32,
    game: &'static str,
}

impl CheerSlot {
    pub fn request(&mut self, token: u64, score: u32, game: &'static str) {
        self.slot.request(token);
        self.score = score;
        self.game = game;
    }

    /// The outstanding request, handed out once for the host to fetch.
    pub fn take_request(&mut self) -> Option<CheerRequest> {
        let token = self.slot.dispatch()?;
        Some(CheerRequest {
            token,
            score: self.score,
            game: self.game,
            prompt: prompts::cheer_prompt(self.score, self.game),
        })
    }

    pub fn deliver(&mut self, token: u64, outcome: Result<String, CollaboratorError>) -> bool {
        self.slot.resolve(token, cheer_or_default(outcome))
    }

    /// Fetch synchronously from `provider` if a request is outstanding.
    pub fn fulfil_with(&mut self, provider: &mut impl CheerProvider) -> bool {
        let Some(token) = self.slot.pending_token() else {
            return false;
        };
        let outcome = provider.cheer(self.score, self.game);
        self.deliver(token, outcome)
    }

    pub fn text(&self) -> Option<&str> {
        self.slot.ready().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.slot.clear();
    }
}
