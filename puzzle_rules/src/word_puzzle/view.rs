//! Read-only projection of the puzzle for rendering.

use serde::{Deserialize, Serialize};

use super::{WordPuzzle, ERROR_BUDGET};
use crate::text::normalize_char;

/// Glyph used for letters that are still hidden.
pub const HIDDEN_GLYPH: char = '_';

/// Everything a presenter needs to draw the current word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleView {
    /// One entry per letter of the word: `Some(letter)` once uncovered.
    pub letters: Vec<Option<char>>,
    pub hint: String,
    /// Raw guesses for this word, oldest first.
    pub guesses: Vec<String>,
    pub wrong_guesses: u8,
    pub error_budget: u8,
    /// Zero-based position of the word in the puzzle.
    pub word_index: usize,
    pub word_count: usize,
}

impl PuzzleView {
    /// The word with hidden letters replaced by `glyph`.
    pub fn masked(&self, glyph: char) -> String {
        self.letters.iter().map(|l| l.unwrap_or(glyph)).collect()
    }
}

impl WordPuzzle {
    /// Project the current word for rendering. `None` once the puzzle is complete.
    pub fn view(&self) -> Option<PuzzleView> {
        let current = self.current_word()?;
        let letters = current
            .word
            .chars()
            .map(|c| {
                normalize_char(c)
                    .filter(|n| self.guessed_letters().contains(n))
                    .map(|_| c)
            })
            .collect();

        Some(PuzzleView {
            letters,
            hint: current.hint.clone(),
            guesses: self.guesses().to_vec(),
            wrong_guesses: self.wrong_guesses(),
            error_budget: ERROR_BUDGET,
            word_index: self.current_index(),
            word_count: self.word_count(),
        })
    }
}
