//! Codename grid stage and its closing confirmation question.

use puzzle_rules::Candidate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Directive, Stage, Turn, TurnContext};
use crate::events::StageEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridPhase {
    /// Waiting for a full grid submission.
    AwaitingGrid,
    /// Grid solved; waiting for the free-text confirmation answer.
    Confirming,
}

#[derive(Debug, Clone)]
pub struct GridStage {
    phase: GridPhase,
    /// Last submitted grid, kept so the form can be corrected.
    draft: Candidate,
}

impl Default for GridStage {
    fn default() -> Self {
        Self::new()
    }
}

impl GridStage {
    pub fn new() -> Self {
        Self {
            phase: GridPhase::AwaitingGrid,
            draft: Candidate::new(),
        }
    }

    pub fn phase(&self) -> GridPhase {
        self.phase
    }

    pub fn draft(&self) -> &Candidate {
        &self.draft
    }

    pub(super) fn enter(&mut self, ctx: &mut TurnContext<'_>) -> Vec<Directive> {
        let mut lines = ctx.content.script.grid_intro.clone();
        lines.extend(ctx.content.grid.clues.iter().cloned());
        vec![Directive::Lines(lines), Directive::RenderGrid]
    }

    /// Check a submitted grid. Only a full exact match passes.
    pub(crate) fn handle_grid(&mut self, candidate: &Candidate, ctx: &mut TurnContext<'_>) -> Turn {
        let script = &ctx.content.script;
        self.draft = candidate.clone();

        let correct = ctx.content.grid_solution().verify(candidate);
        debug!(correct, filled = candidate.is_filled(), "grid submitted");
        let turn = Turn::silent().event(StageEvent::GridSubmitted { correct });
        if !correct {
            return turn.lines(script.grid_wrong.clone());
        }

        self.phase = GridPhase::Confirming;
        turn.lines(script.grid_solved.clone())
    }

    pub(super) fn handle_text(&mut self, input: &str, ctx: &mut TurnContext<'_>) -> Turn {
        if self.phase == GridPhase::AwaitingGrid {
            return Turn::silent();
        }

        let correct = ctx.content.grid.confirmation.accepts(input);
        let turn = Turn::silent().event(StageEvent::ConfirmationAnswered { correct });
        if correct {
            turn.then(Stage::Ending)
        } else {
            turn.lines(ctx.content.script.confirmation_wrong.clone())
        }
    }
}
