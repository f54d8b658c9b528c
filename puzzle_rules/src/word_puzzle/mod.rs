//! The word decoding puzzle - a hangman over a fixed sequence of words.
//!
//! The engine walks the hidden words in order. Each word gets a fresh guess
//! history and error count; when a word is either fully uncovered or its error
//! budget runs out, its outcome is written into the matching phrase slot and
//! the engine moves on. Once every slot is filled the puzzle is complete.

mod view;

pub use view::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::text::{as_latin_letter, normalize};

/// Wrong guesses allowed per word.
pub const ERROR_BUDGET: u8 = 6;

/// A word to decode and the hint shown while it is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenWord {
    /// Uppercase target word, accents included (e.g. `"DETERMINAÇÃO"`).
    pub word: String,
    pub hint: String,
}

impl HiddenWord {
    /// Create a new hidden word.
    pub fn new(word: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            hint: hint.into(),
        }
    }

    /// The word in normalized form.
    pub fn normalized(&self) -> String {
        normalize(&self.word)
    }
}

/// Result of a single letter guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessOutcome {
    /// Input was not a single letter. Nothing changed.
    Rejected,
    /// The exact raw letter was already tried for this word. Nothing changed.
    Repeated,
    /// The letter is in the word.
    Hit,
    /// The letter completed the word.
    HitWordComplete { word: String },
    /// The letter is not in the word.
    Miss,
    /// The letter used up the error budget; the word is lost.
    MissWordFailed { word: String },
}

impl GuessOutcome {
    /// Whether this guess closed the current word (solved or failed).
    pub fn ends_word(&self) -> bool {
        matches!(
            self,
            GuessOutcome::HitWordComplete { .. } | GuessOutcome::MissWordFailed { .. }
        )
    }
}

/// How a word slot in the phrase was filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotOutcome {
    Solved(String),
    Failed(String),
}

impl SlotOutcome {
    /// Text shown in the reconstructed phrase: the word itself, or `(WORD)`.
    pub fn display(&self) -> String {
        match self {
            SlotOutcome::Solved(word) => word.clone(),
            SlotOutcome::Failed(word) => format!("({})", word),
        }
    }
}

/// Guess state for the current word.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WordAttempt {
    /// Raw guesses in the order they were made.
    raw: Vec<String>,
    /// Normalized letters guessed so far.
    letters: BTreeSet<char>,
    wrong: u8,
}

/// Hangman engine over an ordered list of hidden words.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordPuzzle {
    words: Vec<HiddenWord>,
    current: usize,
    slots: Vec<Option<SlotOutcome>>,
    attempt: WordAttempt,
}

impl WordPuzzle {
    /// Create a puzzle over the given words, starting at the first one.
    pub fn new(words: Vec<HiddenWord>) -> Self {
        let slots = vec![None; words.len()];
        Self {
            words,
            current: 0,
            slots,
            attempt: WordAttempt::default(),
        }
    }

    /// Guess a letter for the current word.
    pub fn guess_letter(&mut self, raw: &str) -> GuessOutcome {
        let Some(target) = self.words.get(self.current) else {
            return GuessOutcome::Rejected;
        };
        let Some(letter) = as_latin_letter(raw) else {
            return GuessOutcome::Rejected;
        };

        let raw = raw.trim();
        if self.attempt.raw.iter().any(|g| g == raw) {
            return GuessOutcome::Repeated;
        }
        self.attempt.raw.push(raw.to_string());
        self.attempt.letters.insert(letter);

        let normalized = target.normalized();
        if normalized.contains(letter) {
            if normalized.chars().all(|c| self.attempt.letters.contains(&c)) {
                let word = target.word.clone();
                info!(word = %word, index = self.current, "word decoded");
                self.close_word(SlotOutcome::Solved(word.clone()));
                return GuessOutcome::HitWordComplete { word };
            }
            debug!(%letter, "letter hit");
            return GuessOutcome::Hit;
        }

        self.attempt.wrong += 1;
        if self.attempt.wrong >= ERROR_BUDGET {
            let word = target.word.clone();
            info!(word = %word, index = self.current, "word lost");
            self.close_word(SlotOutcome::Failed(word.clone()));
            return GuessOutcome::MissWordFailed { word };
        }
        debug!(%letter, wrong = self.attempt.wrong, "letter miss");
        GuessOutcome::Miss
    }

    fn close_word(&mut self, outcome: SlotOutcome) {
        self.slots[self.current] = Some(outcome);
        self.current += 1;
        self.attempt = WordAttempt::default();
    }

    /// Whether every word has been solved or failed.
    pub fn is_complete(&self) -> bool {
        self.current >= self.words.len()
    }

    /// The word currently being decoded, if any remain.
    pub fn current_word(&self) -> Option<&HiddenWord> {
        self.words.get(self.current)
    }

    /// Index of the current word (equals the word count once complete).
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Wrong guesses made on the current word.
    pub fn wrong_guesses(&self) -> u8 {
        self.attempt.wrong
    }

    /// Raw guesses made on the current word, oldest first.
    pub fn guesses(&self) -> &[String] {
        &self.attempt.raw
    }

    /// Normalized letters guessed on the current word.
    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.attempt.letters
    }

    /// Outcome recorded for each word so far.
    pub fn slots(&self) -> &[Option<SlotOutcome>] {
        &self.slots
    }

    /// Substitute every `{WORD}` placeholder in `template` with its slot text.
    ///
    /// Slots that are still open are rendered as a run of underscores.
    pub fn reconstruct(&self, template: &str) -> String {
        self.words
            .iter()
            .zip(&self.slots)
            .fold(template.to_string(), |phrase, (hidden, slot)| {
                let text = match slot {
                    Some(outcome) => outcome.display(),
                    None => "_".repeat(hidden.word.chars().count()),
                };
                phrase.replace(&placeholder(&hidden.word), &text)
            })
    }
}

/// The placeholder a phrase template uses for `word`.
pub fn placeholder(word: &str) -> String {
    format!("{{{}}}", word)
}
