//! Flow events - a record of what happened during a playthrough.
//!
//! The machine appends one event per notable outcome. Events carry no
//! presentation text, only the facts a caller might want to inspect or export.

use puzzle_rules::{GuessOutcome, SlotOutcome};
use serde::{Deserialize, Serialize};

use crate::stages::{DifficultyChoice, StageKind};

/// Why a submission was not handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// Input was empty after trimming.
    Empty,
    /// Output was still being presented.
    Busy,
    /// `start` has not been called yet.
    NotStarted,
    /// The active stage no longer takes input.
    InputClosed,
    /// The active stage waits for a grid, not for text.
    AwaitingGrid,
}

/// Something that happened during the flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageEvent {
    StageEntered {
        stage: StageKind,
    },
    NameRejected {
        errors: u32,
    },
    NameAccepted,
    DifficultyRejected {
        input: String,
    },
    DifficultyChosen {
        choice: DifficultyChoice,
    },
    LetterGuessed {
        outcome: GuessOutcome,
    },
    WordClosed {
        index: usize,
        slot: SlotOutcome,
    },
    RiddleAnswered {
        correct: bool,
        tries_remaining: u8,
    },
    RiddleExhausted,
    GridSubmitted {
        correct: bool,
    },
    ConfirmationAnswered {
        correct: bool,
    },
    SubmissionDropped {
        reason: IgnoreReason,
    },
}

impl StageEvent {
    /// Short name of the event kind, for log fields.
    pub fn name(&self) -> &'static str {
        match self {
            StageEvent::StageEntered { .. } => "stage_entered",
            StageEvent::NameRejected { .. } => "name_rejected",
            StageEvent::NameAccepted => "name_accepted",
            StageEvent::DifficultyRejected { .. } => "difficulty_rejected",
            StageEvent::DifficultyChosen { .. } => "difficulty_chosen",
            StageEvent::LetterGuessed { .. } => "letter_guessed",
            StageEvent::WordClosed { .. } => "word_closed",
            StageEvent::RiddleAnswered { .. } => "riddle_answered",
            StageEvent::RiddleExhausted => "riddle_exhausted",
            StageEvent::GridSubmitted { .. } => "grid_submitted",
            StageEvent::ConfirmationAnswered { .. } => "confirmation_answered",
            StageEvent::SubmissionDropped { .. } => "submission_dropped",
        }
    }
}

/// Serialize events as newline-delimited JSON.
pub fn to_json_lines(events: &[StageEvent]) -> serde_json::Result<String> {
    let mut out = String::new();
    for event in events {
        out.push_str(&serde_json::to_string(event)?);
        out.push('\n');
    }
    Ok(out)
}
