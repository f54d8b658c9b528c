//! Final riddle - who is the decoded phrase about?

use puzzle_rules::matches;
use tracing::warn;

use super::{Directive, GridStage, Stage, Turn, TurnContext};
use crate::events::StageEvent;

/// Answers allowed before the stage closes for good.
pub const RIDDLE_TRIES: u8 = 3;

#[derive(Debug, Clone)]
pub struct RiddleStage {
    revealed_phrase: String,
    tries_remaining: u8,
    closed: bool,
}

impl RiddleStage {
    /// Start the riddle for the phrase rebuilt by the word puzzle.
    pub fn new(revealed_phrase: impl Into<String>) -> Self {
        Self {
            revealed_phrase: revealed_phrase.into(),
            tries_remaining: RIDDLE_TRIES,
            closed: false,
        }
    }

    pub fn revealed_phrase(&self) -> &str {
        &self.revealed_phrase
    }

    pub fn tries_remaining(&self) -> u8 {
        self.tries_remaining
    }

    /// True once all tries are spent. A closed riddle is a dead end.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub(super) fn enter(&mut self, ctx: &mut TurnContext<'_>) -> Vec<Directive> {
        let mut lines = vec![format!("\"{}\"", self.revealed_phrase)];
        lines.extend(ctx.content.script.final_reveal.iter().cloned());
        vec![Directive::Lines(lines)]
    }

    pub(super) fn handle(&mut self, input: &str, ctx: &mut TurnContext<'_>) -> Turn {
        if self.closed {
            return Turn::silent();
        }
        let script = &ctx.content.script;

        if matches(input, &ctx.content.riddle.answer) {
            return Turn::silent()
                .event(StageEvent::RiddleAnswered {
                    correct: true,
                    tries_remaining: self.tries_remaining,
                })
                .lines(script.final_success.clone())
                .then(Stage::ConstraintPuzzle(GridStage::new()));
        }

        self.tries_remaining = self.tries_remaining.saturating_sub(1);
        let turn = Turn::silent().event(StageEvent::RiddleAnswered {
            correct: false,
            tries_remaining: self.tries_remaining,
        });
        if self.tries_remaining > 0 {
            return turn.lines(script.final_wrong.render("tries", self.tries_remaining));
        }

        self.closed = true;
        warn!("riddle tries exhausted, closing input");
        turn.event(StageEvent::RiddleExhausted)
            .lines(script.final_fail.clone())
    }
}
