//! The presenter contract and the busy gate.
//!
//! The presenter owns everything visible or audible. The machine only tells
//! it what to show; pacing and animation are up to the implementation.
//! While a turn is being presented the [`BusyGate`] is held and any
//! submission that arrives in the meantime is dropped, not queued.

use puzzle_rules::{PuzzleView, VocabEntry};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A word puzzle projection plus the gallows drawing for its error count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleFrame {
    pub view: PuzzleView,
    pub art: String,
}

/// Rendering side of the flow.
///
/// Every method runs to completion before returning: `show_lines` returns
/// once all lines are fully displayed.
pub trait Presenter {
    /// Display lines in order, one fully before the next.
    fn show_lines(&mut self, lines: &[String]);

    /// Draw the current word of the decoding puzzle.
    fn render_word_puzzle(&mut self, frame: &PuzzleFrame);

    /// Show the codename grid form. Submissions come back through
    /// [`StageMachine::submit_grid`](crate::StageMachine::submit_grid).
    fn render_constraint_grid(&mut self, labels: &[VocabEntry], items: &[VocabEntry]);

    fn show_final_scene(&mut self, text: &str);

    /// Start the soundtrack. Must never fail; an unavailable asset is a no-op.
    fn play_audio(&mut self);

    fn set_input_enabled(&mut self, enabled: bool);

    /// Switch visual theme.
    fn set_theme(&mut self, _theme: &str) {}
}

/// Shared flag that is set while output is being presented.
///
/// Clones share the same flag, so an input reader on another thread can
/// check it before forwarding a line.
#[derive(Debug, Clone, Default)]
pub struct BusyGate(Arc<AtomicBool>);

impl BusyGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether output is currently being presented.
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Take the gate. Returns false if it was already held.
    pub fn try_hold(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }

    pub fn release(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// One recorded presenter call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterCall {
    Lines(Vec<String>),
    WordPuzzle(PuzzleFrame),
    Grid { labels: Vec<String>, items: Vec<String> },
    FinalScene(String),
    PlayAudio,
    InputEnabled(bool),
    Theme(String),
}

/// A presenter that records every call. Useful for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    pub calls: Vec<PresenterCall>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line shown so far, flattened.
    pub fn lines(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PresenterCall::Lines(lines) => Some(lines),
                _ => None,
            })
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// The most recent word puzzle frame.
    pub fn last_frame(&self) -> Option<&PuzzleFrame> {
        self.calls.iter().rev().find_map(|call| match call {
            PresenterCall::WordPuzzle(frame) => Some(frame),
            _ => None,
        })
    }

    /// The last input state requested, if any.
    pub fn input_enabled(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|call| match call {
            PresenterCall::InputEnabled(enabled) => Some(*enabled),
            _ => None,
        })
    }

    /// Whether any shown line contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Presenter for RecordingPresenter {
    fn show_lines(&mut self, lines: &[String]) {
        self.calls.push(PresenterCall::Lines(lines.to_vec()));
    }

    fn render_word_puzzle(&mut self, frame: &PuzzleFrame) {
        self.calls.push(PresenterCall::WordPuzzle(frame.clone()));
    }

    fn render_constraint_grid(&mut self, labels: &[VocabEntry], items: &[VocabEntry]) {
        self.calls.push(PresenterCall::Grid {
            labels: labels.iter().map(|e| e.id.clone()).collect(),
            items: items.iter().map(|e| e.id.clone()).collect(),
        });
    }

    fn show_final_scene(&mut self, text: &str) {
        self.calls.push(PresenterCall::FinalScene(text.to_string()));
    }

    fn play_audio(&mut self) {
        self.calls.push(PresenterCall::PlayAudio);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.calls.push(PresenterCall::InputEnabled(enabled));
    }

    fn set_theme(&mut self, theme: &str) {
        self.calls.push(PresenterCall::Theme(theme.to_string()));
    }
}
