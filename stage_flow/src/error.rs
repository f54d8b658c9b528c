//! Errors raised by the stage machine itself.
//!
//! Wrong answers are not errors; they are ordinary stage outcomes.

use thiserror::Error;

use crate::stages::StageKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    /// Stages only move forward; a stage that was left is never re-entered.
    #[error("cannot move from {from} to {to}: stages only move forward")]
    BackwardTransition { from: StageKind, to: StageKind },

    /// Stages are visited in a fixed order; none may be skipped.
    #[error("cannot move from {from} to {to}: the next stage is {expected:?}")]
    SkippedStage {
        from: StageKind,
        to: StageKind,
        expected: Option<StageKind>,
    },

    /// The active stage is a dead end and cannot be left.
    #[error("stage {0} is closed")]
    StageClosed(StageKind),

    /// A grid was submitted while the active stage is not waiting for one.
    #[error("no grid is awaiting submission in stage {0}")]
    NoGridAwaiting(StageKind),
}
