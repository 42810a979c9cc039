//! Prompt text for the generative collaborators, and parsing of their answers.

use super::CollaboratorError;

/// Number of words requested per lesson.
pub const WORD_COUNT: usize = 10;

/// Keep only `a..=z` (case-folded), preserving order. Punctuation keys from
/// later lessons are not useful for word generation.
pub fn letters_only(keys: &[char]) -> Vec<char> {
    keys.iter()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn join_letters(letters: &[char]) -> String {
    letters
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn cheer_prompt(score: u32, game: &str) -> String {
    format!(
        "Write a very short, exciting and funny congratulation for a child who just scored \
         {score} points in a typing game called \"{game}\". Keep it under 15 words. Use emojis."
    )
}

/// Prompt asking for practice words, or `None` when `allowed` holds no letters
/// (the caller then goes straight to its fallback).
pub fn practice_words_prompt(allowed: &[char], focus: &[char]) -> Option<String> {
    let allowed = letters_only(allowed);
    if allowed.is_empty() {
        return None;
    }
    let focus = letters_only(focus);
    Some(format!(
        "Give a list of {WORD_COUNT} simple, child-friendly real words.\n\
         Rules:\n\
         1. Use ONLY these letters: {}.\n\
         2. Try to include these letters if possible: {}.\n\
         3. Answer with a JSON array of strings.",
        join_letters(&allowed),
        join_letters(&focus),
    ))
}

/// Parse the JSON array answer of the practice-words collaborator.
pub fn parse_word_list(text: &str) -> Result<Vec<String>, CollaboratorError> {
    if text.trim().is_empty() {
        return Err(CollaboratorError::EmptyResponse);
    }
    Ok(serde_json::from_str(text)?)
}
