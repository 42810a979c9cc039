//! Guided lesson mode.
//!
//! Each lesson's practice line opens with triples of its new keys, then
//! continues with generated words that only use keys taught so far. The words
//! come from an outside collaborator; while they are outstanding the lesson is
//! `loading` and ignores typing. A failed, empty or unusable answer falls back
//! to spaced repetitions of the new keys.

mod catalog;

use serde::Serialize;

use crate::collab::prompts::{letters_only, practice_words_prompt};
use crate::collab::{CollaboratorError, Deferred, PracticeTextProvider, words_or_empty};
use crate::keyboard::{self, KeyConfig};

pub use catalog::{LESSONS, Lesson, allowed_letters};

/// Outbound practice-words request, handed to the host as JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WordsRequest {
    pub token: u64,
    pub allowed: Vec<char>,
    pub focus: Vec<char>,
    pub prompt: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LessonKey {
    Typed,
    Erased,
    /// This keystroke made the input equal the practice line.
    Completed,
    Ignored,
}

#[derive(Clone, Debug, Serialize)]
pub struct LessonSnapshot {
    pub index: usize,
    pub total: usize,
    pub title: &'static str,
    pub description: &'static str,
    pub loading: bool,
    pub completed: bool,
    pub target: String,
    pub input: String,
    pub on_track: bool,
    pub progress: f64,
    pub next_char: Option<char>,
    pub next_key: Option<KeyConfig>,
}

/// Practice line for `focus` keys followed by `words`; with no words, the
/// keys are repeated instead.
pub fn build_practice_text(focus: &[char], words: &[String]) -> String {
    let mut practice: String = focus.iter().map(|l| format!("{l}{l}{l} ")).collect();
    if words.is_empty() {
        let spaced: Vec<String> = focus.iter().map(|l| format!("{l} ")).collect();
        practice.push_str(&spaced.join(" "));
    } else {
        practice.push_str(&words.join(" "));
    }
    practice.trim().to_string()
}

/// The line shown when no usable words arrive.
pub fn fallback_text(focus: &[char]) -> String {
    build_practice_text(focus, &[])
}

/// Lowercase the provider's words and keep only those spelled with `allowed` keys.
fn usable_words(words: Vec<String>, allowed: &[char]) -> Vec<String> {
    words
        .into_iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty() && w.chars().all(|c| allowed.contains(&c)))
        .collect()
}

pub struct LessonSession {
    index: usize,
    text: Deferred<String>,
    input: String,
    completed: bool,
    next_token: u64,
}

impl LessonSession {
    /// Open lesson `index` (clamped to the catalog).
    pub fn new(index: usize) -> Self {
        let mut s = Self {
            index: 0,
            text: Deferred::Idle,
            input: String::new(),
            completed: false,
            next_token: 1,
        };
        s.load(index.min(LESSONS.len() - 1));
        s
    }

    fn load(&mut self, index: usize) {
        self.index = index;
        self.input.clear();
        self.completed = false;
        let token = self.next_token;
        self.next_token += 1;
        self.text.request(token);
        if practice_words_prompt(&self.allowed(), self.focus()).is_none() {
            // Nothing to ask for; settle on the fallback right away.
            self.text.resolve(token, fallback_text(self.focus()));
        }
        log::debug!("lesson {} loading ({})", index, self.lesson().title);
    }

    /// Jump to lesson `index`; out-of-range selections are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= LESSONS.len() {
            return false;
        }
        self.load(index);
        true
    }

    pub fn next_lesson(&mut self) -> bool {
        self.select(self.index + 1)
    }

    pub fn previous_lesson(&mut self) -> bool {
        match self.index.checked_sub(1) {
            Some(i) => self.select(i),
            None => false,
        }
    }

    /// Reload the current lesson with a fresh practice line.
    pub fn restart(&mut self) {
        self.load(self.index);
    }

    pub fn lesson(&self) -> &'static Lesson {
        &LESSONS[self.index]
    }

    pub fn focus(&self) -> &'static [char] {
        self.lesson().letters
    }

    pub fn allowed(&self) -> Vec<char> {
        allowed_letters(self.index)
    }

    pub fn take_words_request(&mut self) -> Option<WordsRequest> {
        let token = self.text.dispatch()?;
        let allowed = self.allowed();
        let prompt = practice_words_prompt(&allowed, self.focus())?;
        Some(WordsRequest {
            token,
            allowed: letters_only(&allowed),
            focus: letters_only(self.focus()),
            prompt,
        })
    }

    pub fn deliver_words(
        &mut self,
        token: u64,
        outcome: Result<Vec<String>, CollaboratorError>,
    ) -> bool {
        let words = usable_words(words_or_empty(outcome), &self.allowed());
        if words.is_empty() {
            log::info!("lesson {}: no usable practice words, repeating keys", self.index);
        }
        let text = build_practice_text(self.focus(), &words);
        self.text.resolve(token, text)
    }

    /// Fetch words synchronously from `provider` if a request is outstanding.
    pub fn fulfil_words(&mut self, provider: &mut impl PracticeTextProvider) -> bool {
        let Some(token) = self.text.pending_token() else {
            return false;
        };
        let allowed = letters_only(&self.allowed());
        let outcome = provider.practice_words(&allowed, &letters_only(self.focus()));
        self.deliver_words(token, outcome)
    }

    pub fn is_loading(&self) -> bool {
        self.text.is_pending()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn target(&self) -> &str {
        self.text.ready().map(String::as_str).unwrap_or("")
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Apply a host key name. `Backspace` erases; other named keys are ignored.
    pub fn press_key(&mut self, key: &str) -> LessonKey {
        if self.completed || self.is_loading() {
            return LessonKey::Ignored;
        }
        if key == "Backspace" {
            self.input.pop();
            return LessonKey::Erased;
        }
        let mut chars = key.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return LessonKey::Ignored;
        };
        self.input.push(c);
        if self.input == self.target() {
            self.completed = true;
            log::info!("lesson {} completed", self.index);
            return LessonKey::Completed;
        }
        LessonKey::Typed
    }

    /// Input so far matches the start of the practice line.
    pub fn on_track(&self) -> bool {
        self.target().starts_with(&self.input)
    }

    pub fn progress(&self) -> f64 {
        let total = self.target().chars().count();
        if total == 0 {
            return 0.0;
        }
        (self.input.chars().count() as f64 / total as f64 * 100.0).min(100.0)
    }

    pub fn next_char(&self) -> Option<char> {
        self.target().chars().nth(self.input.chars().count())
    }

    pub fn snapshot(&self) -> LessonSnapshot {
        let next_char = self.next_char();
        LessonSnapshot {
            index: self.index,
            total: LESSONS.len(),
            title: self.lesson().title,
            description: self.lesson().description,
            loading: self.is_loading(),
            completed: self.completed,
            target: self.target().to_string(),
            input: self.input.clone(),
            on_track: self.on_track(),
            progress: self.progress(),
            next_char,
            next_key: next_char.and_then(keyboard::lookup).copied(),
        }
    }
}
