//! Errors that end a terminal session.

use std::path::PathBuf;

use puzzle_rules::ContentError;
use stage_flow::FlowError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("could not load the script table: {0}")]
    Content(#[from] ContentError),

    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error("could not encode the event log: {0}")]
    Events(#[from] serde_json::Error),

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not start the input reader: {0}")]
    Reader(#[source] std::io::Error),
}

impl TerminalError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            TerminalError::Content(_) => 2,
            _ => 1,
        }
    }
}
