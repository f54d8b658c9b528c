//! Word decoding stage - one letter per submission.

use puzzle_rules::{Content, GuessOutcome, WordPuzzle};

use super::{Directive, RiddleStage, Stage, Turn, TurnContext};
use crate::events::StageEvent;
use crate::presenter::PuzzleFrame;

#[derive(Debug, Clone)]
pub struct WordStage {
    puzzle: WordPuzzle,
}

impl WordStage {
    pub fn new(puzzle: WordPuzzle) -> Self {
        Self { puzzle }
    }

    pub fn puzzle(&self) -> &WordPuzzle {
        &self.puzzle
    }

    pub(super) fn enter(&mut self, ctx: &mut TurnContext<'_>) -> Vec<Directive> {
        let mut directives = vec![Directive::Lines(ctx.content.script.challenge_intro.clone())];
        directives.extend(self.render(ctx.content));
        directives
    }

    pub(super) fn handle(&mut self, input: &str, ctx: &mut TurnContext<'_>) -> Turn {
        let content = ctx.content;
        let script = &content.script;
        let index = self.puzzle.current_index();
        let outcome = self.puzzle.guess_letter(input);

        let lines = match &outcome {
            GuessOutcome::Rejected => return Turn::silent(),
            GuessOutcome::Repeated => script.guess_repeated.clone(),
            GuessOutcome::Hit => ctx.pick_line(&script.guess_correct),
            GuessOutcome::Miss => ctx.pick_line(&script.guess_wrong),
            GuessOutcome::HitWordComplete { .. } => script.word_success.clone(),
            GuessOutcome::MissWordFailed { word } => script.word_fail.render("word", word),
        };

        let mut turn = Turn::silent()
            .event(StageEvent::LetterGuessed {
                outcome: outcome.clone(),
            })
            .lines(lines);

        if outcome.ends_word() {
            if let Some(Some(slot)) = self.puzzle.slots().get(index) {
                turn = turn.event(StageEvent::WordClosed {
                    index,
                    slot: slot.clone(),
                });
            }
        }

        if self.puzzle.is_complete() {
            let phrase = self.puzzle.reconstruct(&content.phrase_template);
            return turn.then(Stage::FinalRiddle(RiddleStage::new(phrase)));
        }

        for directive in self.render(content) {
            turn = turn.directive(directive);
        }
        turn
    }

    fn render(&self, content: &Content) -> Option<Directive> {
        let view = self.puzzle.view()?;
        let art = content.hangman_for(view.wrong_guesses).to_string();
        Some(Directive::RenderWordPuzzle(PuzzleFrame { view, art }))
    }
}
