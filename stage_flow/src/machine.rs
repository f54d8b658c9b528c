//! The stage machine - owns the active stage and runs one turn per submission.
//!
//! A turn works as follows:
//! 1. **Gate**: drop the submission if it is empty, output is still being
//!    presented, or the stage no longer takes input
//! 2. **Dispatch**: hand the trimmed text to the active stage's handler
//! 3. **Present**: apply the returned directives to the presenter, in order
//! 4. **Transition**: if the handler named a next stage, swap it in and run
//!    its entry action
//!
//! Stages only ever move forward: Intro, WordPuzzle, FinalRiddle,
//! ConstraintPuzzle, Ending.

use puzzle_rules::{Candidate, Content};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, info_span, Span};

use crate::error::FlowError;
use crate::events::{IgnoreReason, StageEvent};
use crate::presenter::{BusyGate, Presenter};
use crate::session::SessionId;
use crate::stages::{Directive, IntroStage, Stage, StageKind, Turn, TurnContext};

/// What happened to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Submission {
    Handled,
    Ignored(IgnoreReason),
}

/// Orchestrates the flow for one player.
pub struct StageMachine<P: Presenter> {
    content: Content,
    presenter: P,
    stage: Stage,
    rng: StdRng,
    gate: BusyGate,
    session: SessionId,
    span: Span,
    events: Vec<StageEvent>,
    started: bool,
}

impl<P: Presenter> StageMachine<P> {
    /// Create a machine with an OS-seeded line picker.
    pub fn new(content: Content, presenter: P) -> Self {
        Self::with_rng(content, presenter, StdRng::from_os_rng())
    }

    /// Create a machine whose random line choices are reproducible.
    pub fn with_seed(content: Content, presenter: P, seed: u64) -> Self {
        Self::with_rng(content, presenter, StdRng::seed_from_u64(seed))
    }

    fn with_rng(content: Content, presenter: P, rng: StdRng) -> Self {
        let session = SessionId::new();
        Self {
            content,
            presenter,
            stage: Stage::Intro(IntroStage::new()),
            rng,
            gate: BusyGate::new(),
            session,
            span: info_span!("session", id = %session),
            events: Vec::new(),
            started: false,
        }
    }

    /// Present the opening lines. Calling it again does nothing.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        let span = self.span.clone();
        let _guard = span.enter();

        info!("session started");
        self.begin_turn();
        self.events.push(StageEvent::StageEntered {
            stage: self.stage.kind(),
        });
        let directives = {
            let mut ctx = TurnContext {
                content: &self.content,
                rng: &mut self.rng,
            };
            self.stage.enter(&mut ctx)
        };
        self.present(directives);
        self.end_turn();
    }

    /// Submit one line of player text.
    pub fn submit(&mut self, raw: &str) -> Submission {
        let span = self.span.clone();
        let _guard = span.enter();

        let text = raw.trim();
        if let Some(reason) = self.gate_text(text) {
            if reason == IgnoreReason::Busy {
                self.events.push(StageEvent::SubmissionDropped { reason });
            }
            debug!(?reason, stage = %self.stage.kind(), "submission ignored");
            return Submission::Ignored(reason);
        }

        let turn = {
            let mut ctx = TurnContext {
                content: &self.content,
                rng: &mut self.rng,
            };
            self.stage.handle_text(text, &mut ctx)
        };
        self.apply(turn);
        Submission::Handled
    }

    /// Submit a codename grid from the presenter's form.
    pub fn submit_grid(&mut self, candidate: &Candidate) -> Result<Submission, FlowError> {
        let span = self.span.clone();
        let _guard = span.enter();

        if !self.started {
            return Ok(Submission::Ignored(IgnoreReason::NotStarted));
        }
        if self.gate.is_busy() {
            self.events.push(StageEvent::SubmissionDropped {
                reason: IgnoreReason::Busy,
            });
            return Ok(Submission::Ignored(IgnoreReason::Busy));
        }

        if !self.stage.awaits_grid() {
            return Err(FlowError::NoGridAwaiting(self.stage.kind()));
        }
        let turn = match &mut self.stage {
            Stage::ConstraintPuzzle(grid) => {
                let mut ctx = TurnContext {
                    content: &self.content,
                    rng: &mut self.rng,
                };
                grid.handle_grid(candidate, &mut ctx)
            }
            other => return Err(FlowError::NoGridAwaiting(other.kind())),
        };
        self.apply(turn);
        Ok(Submission::Handled)
    }

    /// Replace the active stage and run its entry action.
    ///
    /// Fails unless `next` is the stage directly after the active one, or if
    /// the active stage is closed.
    pub fn transition(&mut self, next: Stage) -> Result<(), FlowError> {
        let from = self.stage.kind();
        let to = next.kind();
        check_transition(from, to)?;
        if !self.stage.accepts_input() {
            return Err(FlowError::StageClosed(from));
        }

        let owns_turn = self.begin_turn();
        info!(%from, %to, "stage transition");
        self.stage = next;
        self.events.push(StageEvent::StageEntered { stage: to });

        let directives = {
            let mut ctx = TurnContext {
                content: &self.content,
                rng: &mut self.rng,
            };
            self.stage.enter(&mut ctx)
        };
        self.present(directives);
        if owns_turn {
            self.end_turn();
        }
        Ok(())
    }

    fn gate_text(&self, text: &str) -> Option<IgnoreReason> {
        if !self.started {
            Some(IgnoreReason::NotStarted)
        } else if text.is_empty() {
            Some(IgnoreReason::Empty)
        } else if self.gate.is_busy() {
            Some(IgnoreReason::Busy)
        } else if !self.stage.accepts_input() {
            Some(IgnoreReason::InputClosed)
        } else if self.stage.awaits_grid() {
            Some(IgnoreReason::AwaitingGrid)
        } else {
            None
        }
    }

    fn apply(&mut self, turn: Turn) {
        if turn.is_silent() {
            return;
        }
        for event in &turn.events {
            debug!(event = event.name(), "stage event");
        }
        self.events.extend(turn.events);

        self.begin_turn();
        self.present(turn.directives);
        if let Some(next) = turn.next {
            if let Err(err) = self.transition(next) {
                error!(%err, "stage transition refused");
            }
        }
        self.end_turn();
    }

    /// Hold the busy gate and disable input. Returns false if already held.
    fn begin_turn(&mut self) -> bool {
        if !self.gate.try_hold() {
            return false;
        }
        self.presenter.set_input_enabled(false);
        true
    }

    fn end_turn(&mut self) {
        self.presenter.set_input_enabled(self.stage.accepts_input());
        self.gate.release();
    }

    fn present(&mut self, directives: Vec<Directive>) {
        for directive in directives {
            match directive {
                Directive::Lines(lines) => {
                    if !lines.is_empty() {
                        self.presenter.show_lines(&lines);
                    }
                }
                Directive::Theme(theme) => self.presenter.set_theme(&theme),
                Directive::RenderWordPuzzle(frame) => self.presenter.render_word_puzzle(&frame),
                Directive::RenderGrid => self
                    .presenter
                    .render_constraint_grid(&self.content.grid.labels, &self.content.grid.items),
                Directive::FinalScene(text) => self.presenter.show_final_scene(&text),
                Directive::PlayAudio => self.presenter.play_audio(),
            }
        }
    }

    /// The active stage.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_kind(&self) -> StageKind {
        self.stage.kind()
    }

    /// Whether the active stage is waiting for a grid instead of text.
    pub fn awaits_grid(&self) -> bool {
        self.stage.awaits_grid()
    }

    /// Whether the player can still make progress.
    pub fn accepts_input(&self) -> bool {
        self.stage.accepts_input()
    }

    /// A handle to the busy flag, for input readers on other threads.
    pub fn busy_gate(&self) -> BusyGate {
        self.gate.clone()
    }

    pub fn session_id(&self) -> SessionId {
        self.session
    }

    pub fn events(&self) -> &[StageEvent] {
        &self.events
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }
}

fn check_transition(from: StageKind, to: StageKind) -> Result<(), FlowError> {
    if to <= from {
        return Err(FlowError::BackwardTransition { from, to });
    }
    let expected = from.next();
    if expected != Some(to) {
        return Err(FlowError::SkippedStage { from, to, expected });
    }
    Ok(())
}
