//! The stages of the flow and their input handlers.
//!
//! A [`Stage`] carries only its own sub-state. Handlers never touch the
//! presenter; they return a [`Turn`] describing what to show and, optionally,
//! the stage to move to. The machine applies it.

mod grid;
mod intro;
mod riddle;
mod word;

pub use grid::*;
pub use intro::*;
pub use riddle::*;
pub use word::*;

use puzzle_rules::Content;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::events::StageEvent;
use crate::presenter::PuzzleFrame;

/// Stage identity, in flow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StageKind {
    Intro,
    WordPuzzle,
    FinalRiddle,
    ConstraintPuzzle,
    Ending,
}

impl StageKind {
    /// The stage that follows this one, if any.
    pub fn next(self) -> Option<StageKind> {
        match self {
            StageKind::Intro => Some(StageKind::WordPuzzle),
            StageKind::WordPuzzle => Some(StageKind::FinalRiddle),
            StageKind::FinalRiddle => Some(StageKind::ConstraintPuzzle),
            StageKind::ConstraintPuzzle => Some(StageKind::Ending),
            StageKind::Ending => None,
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StageKind::Intro => "intro",
            StageKind::WordPuzzle => "word_puzzle",
            StageKind::FinalRiddle => "final_riddle",
            StageKind::ConstraintPuzzle => "constraint_puzzle",
            StageKind::Ending => "ending",
        };
        f.write_str(name)
    }
}

/// A single presenter instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Lines(Vec<String>),
    Theme(String),
    RenderWordPuzzle(PuzzleFrame),
    RenderGrid,
    FinalScene(String),
    PlayAudio,
}

/// The result of handling one submission.
#[derive(Debug, Default)]
pub struct Turn {
    pub directives: Vec<Directive>,
    pub events: Vec<StageEvent>,
    pub next: Option<Stage>,
}

impl Turn {
    /// A turn that shows nothing and changes nothing.
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn lines(mut self, lines: Vec<String>) -> Self {
        if !lines.is_empty() {
            self.directives.push(Directive::Lines(lines));
        }
        self
    }

    pub fn directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn event(mut self, event: StageEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn then(mut self, next: Stage) -> Self {
        self.next = Some(next);
        self
    }

    pub fn is_silent(&self) -> bool {
        self.directives.is_empty() && self.events.is_empty() && self.next.is_none()
    }
}

/// What a handler may read: the script table and the line picker.
pub struct TurnContext<'a> {
    pub content: &'a Content,
    pub rng: &'a mut StdRng,
}

impl TurnContext<'_> {
    /// One variant from a pool of line groups, uniformly at random.
    ///
    /// Repeats are allowed; earlier picks are not excluded.
    pub fn pick_variant(&mut self, pool: &[Vec<String>]) -> Vec<String> {
        if pool.is_empty() {
            return Vec::new();
        }
        pool[self.rng.random_range(0..pool.len())].clone()
    }

    /// One line from a pool, uniformly at random.
    pub fn pick_line(&mut self, pool: &[String]) -> Vec<String> {
        if pool.is_empty() {
            return Vec::new();
        }
        vec![pool[self.rng.random_range(0..pool.len())].clone()]
    }
}

/// The active stage with its own sub-state.
#[derive(Debug, Clone)]
pub enum Stage {
    Intro(IntroStage),
    WordPuzzle(WordStage),
    FinalRiddle(RiddleStage),
    ConstraintPuzzle(GridStage),
    Ending,
}

impl Stage {
    pub fn kind(&self) -> StageKind {
        match self {
            Stage::Intro(_) => StageKind::Intro,
            Stage::WordPuzzle(_) => StageKind::WordPuzzle,
            Stage::FinalRiddle(_) => StageKind::FinalRiddle,
            Stage::ConstraintPuzzle(_) => StageKind::ConstraintPuzzle,
            Stage::Ending => StageKind::Ending,
        }
    }

    /// Entry action: what to show when the stage becomes active.
    pub fn enter(&mut self, ctx: &mut TurnContext<'_>) -> Vec<Directive> {
        match self {
            Stage::Intro(stage) => stage.enter(ctx),
            Stage::WordPuzzle(stage) => stage.enter(ctx),
            Stage::FinalRiddle(stage) => stage.enter(ctx),
            Stage::ConstraintPuzzle(stage) => stage.enter(ctx),
            Stage::Ending => vec![
                Directive::Lines(ctx.content.script.ending.clone()),
                Directive::FinalScene(ctx.content.final_text.clone()),
                Directive::PlayAudio,
            ],
        }
    }

    /// Route one line of trimmed, non-empty text to the stage.
    pub fn handle_text(&mut self, input: &str, ctx: &mut TurnContext<'_>) -> Turn {
        match self {
            Stage::Intro(stage) => stage.handle(input, ctx),
            Stage::WordPuzzle(stage) => stage.handle(input, ctx),
            Stage::FinalRiddle(stage) => stage.handle(input, ctx),
            Stage::ConstraintPuzzle(stage) => stage.handle_text(input, ctx),
            Stage::Ending => Turn::silent(),
        }
    }

    /// Whether the player can still type into this stage.
    pub fn accepts_input(&self) -> bool {
        match self {
            Stage::FinalRiddle(stage) => !stage.is_closed(),
            Stage::Ending => false,
            _ => true,
        }
    }

    /// Whether the stage is waiting for a grid submission rather than text.
    pub fn awaits_grid(&self) -> bool {
        matches!(self, Stage::ConstraintPuzzle(stage) if stage.phase() == GridPhase::AwaitingGrid)
    }
}
