//! Introduction: name check, then difficulty choice.

use puzzle_rules::{matches, IntroContent};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Directive, Stage, Turn, TurnContext, WordStage};
use crate::events::StageEvent;

/// Sub-phase of the introduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntroPhase {
    GetName,
    GetDifficulty,
}

/// Accepted difficulty answers. The choice only changes flavor text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyChoice {
    EasyOrMedium,
    Hard,
}

#[derive(Debug, Clone)]
pub struct IntroStage {
    phase: IntroPhase,
    /// Rejected answers across both sub-phases.
    error_count: u32,
    /// Rejected answers while asking for the name.
    name_errors: u32,
}

impl Default for IntroStage {
    fn default() -> Self {
        Self::new()
    }
}

impl IntroStage {
    pub fn new() -> Self {
        Self {
            phase: IntroPhase::GetName,
            error_count: 0,
            name_errors: 0,
        }
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn name_errors(&self) -> u32 {
        self.name_errors
    }

    pub(super) fn enter(&mut self, ctx: &mut TurnContext<'_>) -> Vec<Directive> {
        vec![Directive::Lines(ctx.content.script.initial.clone())]
    }

    pub(super) fn handle(&mut self, input: &str, ctx: &mut TurnContext<'_>) -> Turn {
        match self.phase {
            IntroPhase::GetName => self.handle_name(input, ctx),
            IntroPhase::GetDifficulty => self.handle_difficulty(input, ctx),
        }
    }

    fn handle_name(&mut self, input: &str, ctx: &mut TurnContext<'_>) -> Turn {
        let content = ctx.content;
        let intro = &content.intro;
        if intro.accepted_names.iter().any(|name| matches(name, input)) {
            self.phase = IntroPhase::GetDifficulty;
            let mut turn = Turn::silent().event(StageEvent::NameAccepted);
            if let Some(theme) = &intro.theme {
                turn = turn.directive(Directive::Theme(theme.clone()));
            }
            return turn.lines(content.script.difficulty_prompt.clone());
        }

        self.error_count += 1;
        self.name_errors += 1;
        debug!(errors = self.error_count, "name rejected");
        let lines = ctx.pick_variant(&content.script.name_error);
        Turn::silent()
            .event(StageEvent::NameRejected {
                errors: self.error_count,
            })
            .lines(lines)
    }

    fn handle_difficulty(&mut self, input: &str, ctx: &mut TurnContext<'_>) -> Turn {
        let content = ctx.content;
        let script = &content.script;
        let Some(choice) = classify_difficulty(&content.intro, input) else {
            self.error_count += 1;
            debug!(errors = self.error_count, input, "difficulty rejected");
            let mut lines = vec![format!("\"{}\"?", input)];
            lines.extend(ctx.pick_variant(&script.difficulty_error));
            return Turn::silent()
                .event(StageEvent::DifficultyRejected {
                    input: input.to_string(),
                })
                .lines(lines);
        };

        let lines = match choice {
            DifficultyChoice::EasyOrMedium => script.easy_medium_choice.clone(),
            DifficultyChoice::Hard if self.name_errors > 0 => script.hard_choice_with_error.clone(),
            DifficultyChoice::Hard => script.hard_choice_no_error.clone(),
        };
        Turn::silent()
            .event(StageEvent::DifficultyChosen { choice })
            .lines(lines)
            .then(Stage::WordPuzzle(WordStage::new(content.word_puzzle())))
    }
}

fn classify_difficulty(intro: &IntroContent, input: &str) -> Option<DifficultyChoice> {
    if intro.easy_choices.iter().any(|c| matches(c, input)) {
        Some(DifficultyChoice::EasyOrMedium)
    } else if intro.hard_choices.iter().any(|c| matches(c, input)) {
        Some(DifficultyChoice::Hard)
    } else {
        None
    }
}
