//! The script table - every line IAgo says plus the puzzle data.
//!
//! Content is pure data. It is deserialized from TOML, checked once with
//! [`Content::validate`] and then handed to the stage machine as configuration.

mod error;

pub use error::*;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::constraint::{ConfirmationQuestion, GridSolution, SolutionRow, GRID_SIZE};
use crate::word_puzzle::{placeholder, HiddenWord, WordPuzzle, ERROR_BUDGET};

const BUILTIN: &str = include_str!("../../content/iago.toml");

/// A group of lines with one named placeholder, e.g. `{word}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineTemplate(pub Vec<String>);

impl LineTemplate {
    /// Render every line, replacing `{key}` with `value`.
    pub fn render(&self, key: &str, value: impl std::fmt::Display) -> Vec<String> {
        let needle = format!("{{{}}}", key);
        let value = value.to_string();
        self.0.iter().map(|line| line.replace(&needle, &value)).collect()
    }
}

/// An entry of the grid vocabulary: a stable id and how it is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub id: String,
    pub name: String,
}

/// Answers accepted during the introduction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntroContent {
    pub accepted_names: Vec<String>,
    pub easy_choices: Vec<String>,
    pub hard_choices: Vec<String>,
    /// Presenter theme switched on once the name is accepted.
    #[serde(default)]
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiddleContent {
    pub answer: String,
}

/// The codename grid: vocabularies, clues, solution and closing question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridContent {
    pub clues: Vec<String>,
    pub labels: Vec<VocabEntry>,
    pub items: Vec<VocabEntry>,
    pub solution: Vec<SolutionRow>,
    pub confirmation: ConfirmationQuestion,
}

/// Every scripted line group, keyed by the event that shows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub initial: Vec<String>,
    pub name_error: Vec<Vec<String>>,
    pub difficulty_prompt: Vec<String>,
    pub difficulty_error: Vec<Vec<String>>,
    pub easy_medium_choice: Vec<String>,
    pub hard_choice_with_error: Vec<String>,
    pub hard_choice_no_error: Vec<String>,
    pub challenge_intro: Vec<String>,
    /// One line is picked per hit.
    pub guess_correct: Vec<String>,
    /// One line is picked per miss.
    pub guess_wrong: Vec<String>,
    pub guess_repeated: Vec<String>,
    pub word_success: Vec<String>,
    pub word_fail: LineTemplate,
    pub final_reveal: Vec<String>,
    pub final_success: Vec<String>,
    pub final_wrong: LineTemplate,
    pub final_fail: Vec<String>,
    pub grid_intro: Vec<String>,
    pub grid_wrong: Vec<String>,
    pub grid_solved: Vec<String>,
    pub confirmation_wrong: Vec<String>,
    pub ending: Vec<String>,
}

/// The complete script table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Phrase with one `{WORD}` placeholder per hidden word.
    pub phrase_template: String,
    /// Gallows drawings indexed by wrong-guess count.
    pub hangman_art: Vec<String>,
    /// Text of the closing scene.
    pub final_text: String,
    pub intro: IntroContent,
    pub words: Vec<HiddenWord>,
    pub riddle: RiddleContent,
    pub grid: GridContent,
    pub script: Script,
}

impl Content {
    /// The table shipped with the crate.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_toml_str(BUILTIN)
    }

    /// Parse and validate a table from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ContentError> {
        let content: Content = toml::from_str(text)?;
        content.validate()?;
        Ok(content)
    }

    /// Read, parse and validate a table from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check the invariants the puzzles rely on.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.words.is_empty() {
            return Err(ContentError::NoWords);
        }
        for hidden in &self.words {
            if hidden.word.is_empty() || !hidden.word.chars().all(char::is_uppercase) {
                return Err(ContentError::InvalidWord(hidden.word.clone()));
            }
            if !self.phrase_template.contains(&placeholder(&hidden.word)) {
                return Err(ContentError::MissingPlaceholder(hidden.word.clone()));
            }
        }

        let expected_art = usize::from(ERROR_BUDGET) + 1;
        if self.hangman_art.len() != expected_art {
            return Err(ContentError::HangmanArt {
                expected: expected_art,
                found: self.hangman_art.len(),
            });
        }

        if self.riddle.answer.trim().is_empty() {
            return Err(ContentError::EmptyRiddleAnswer);
        }

        self.validate_grid()?;
        self.validate_script()?;

        debug!(words = self.words.len(), "content validated");
        Ok(())
    }

    fn validate_grid(&self) -> Result<(), ContentError> {
        let labels = distinct_ids("codenames", &self.grid.labels)?;
        let items = distinct_ids("weapons", &self.grid.items)?;

        if self.grid.solution.len() != GRID_SIZE {
            return Err(ContentError::Vocabulary {
                what: "solution",
                expected: GRID_SIZE,
                found: self.grid.solution.len(),
            });
        }

        let mut used_labels = HashSet::new();
        let mut used_items = HashSet::new();
        for (i, row) in self.grid.solution.iter().enumerate() {
            if !labels.contains(row.label.as_str()) {
                return Err(ContentError::UnknownSolutionValue {
                    position: i + 1,
                    what: "codename",
                    value: row.label.clone(),
                });
            }
            if !items.contains(row.item.as_str()) {
                return Err(ContentError::UnknownSolutionValue {
                    position: i + 1,
                    what: "weapon",
                    value: row.item.clone(),
                });
            }
            if !used_labels.insert(row.label.as_str()) || !used_items.insert(row.item.as_str()) {
                return Err(ContentError::SolutionNotBijective);
            }
        }

        let confirmation = &self.grid.confirmation;
        let Some(item) = self
            .grid
            .solution
            .iter()
            .find(|row| row.label == confirmation.label)
            .map(|row| row.item.as_str())
        else {
            return Err(ContentError::UnknownConfirmationLabel(
                confirmation.label.clone(),
            ));
        };
        let expected = self.display_name(item);
        if !confirmation.accepts(expected) {
            return Err(ContentError::ConfirmationMismatch {
                label: confirmation.label.clone(),
                answer: confirmation.answer.clone(),
                expected: expected.to_string(),
            });
        }
        Ok(())
    }

    fn validate_script(&self) -> Result<(), ContentError> {
        let s = &self.script;
        let groups: [(&'static str, bool); 6] = [
            ("name_error", s.name_error.is_empty()),
            ("difficulty_error", s.difficulty_error.is_empty()),
            ("guess_correct", s.guess_correct.is_empty()),
            ("guess_wrong", s.guess_wrong.is_empty()),
            ("initial", s.initial.is_empty()),
            ("final_reveal", s.final_reveal.is_empty()),
        ];
        match groups.into_iter().find(|(_, empty)| *empty) {
            Some((name, _)) => Err(ContentError::EmptyLines(name)),
            None => Ok(()),
        }
    }

    /// A fresh word puzzle over this table's words.
    pub fn word_puzzle(&self) -> WordPuzzle {
        WordPuzzle::new(self.words.clone())
    }

    /// The grid solution in position order.
    pub fn grid_solution(&self) -> GridSolution {
        GridSolution::new(self.grid.solution.clone())
    }

    /// Drawing for a wrong-guess count, clamped to the last one.
    pub fn hangman_for(&self, wrong_guesses: u8) -> &str {
        let index = usize::from(wrong_guesses).min(self.hangman_art.len().saturating_sub(1));
        self.hangman_art.get(index).map(String::as_str).unwrap_or_default()
    }

    /// Display name of a grid vocabulary id.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.grid
            .labels
            .iter()
            .chain(&self.grid.items)
            .find(|entry| entry.id == id)
            .map(|entry| entry.name.as_str())
            .unwrap_or(id)
    }
}

fn distinct_ids<'a>(
    what: &'static str,
    entries: &'a [VocabEntry],
) -> Result<HashSet<&'a str>, ContentError> {
    let ids: HashSet<&str> = entries.iter().map(|e| e.id.as_str()).collect();
    if entries.len() != GRID_SIZE || ids.len() != GRID_SIZE {
        return Err(ContentError::Vocabulary {
            what,
            expected: GRID_SIZE,
            found: ids.len(),
        });
    }
    Ok(ids)
}
