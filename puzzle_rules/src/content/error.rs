//! Errors raised while loading or validating a script table.

use std::path::PathBuf;
use thiserror::Error;

/// Why a script table could not be used.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid content TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("the word list is empty")]
    NoWords,

    #[error("word {0:?} must contain only uppercase letters")]
    InvalidWord(String),

    #[error("phrase template has no placeholder for {0:?}")]
    MissingPlaceholder(String),

    #[error("expected {expected} hangman drawings, found {found}")]
    HangmanArt { expected: usize, found: usize },

    #[error("{what} must have exactly {expected} distinct entries, found {found}")]
    Vocabulary {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("solution row {position} uses unknown {what} {value:?}")]
    UnknownSolutionValue {
        position: usize,
        what: &'static str,
        value: String,
    },

    #[error("solution must use each codename and weapon exactly once")]
    SolutionNotBijective,

    #[error("confirmation codename {0:?} is not part of the solution")]
    UnknownConfirmationLabel(String),

    #[error("confirmation answer {answer:?} does not name {expected:?}, the weapon of {label:?}")]
    ConfirmationMismatch {
        label: String,
        answer: String,
        expected: String,
    },

    #[error("line group {0:?} is empty")]
    EmptyLines(&'static str),

    #[error("riddle answer is empty")]
    EmptyRiddleAnswer,
}
