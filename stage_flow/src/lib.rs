//! # Stage Flow
//!
//! Drives the scripted IAgo sequence for a single player. This crate sits on
//! top of `puzzle_rules` and hands everything visible to a [`Presenter`].
//!
//! ## Core Components
//!
//! - **stages**: the stage sum type and one input handler per stage
//! - **machine**: the orchestrator that owns the active stage and the busy gate
//! - **presenter**: the rendering contract plus a recording implementation
//! - **events**: what happened during a playthrough
//!
//! ## Design Philosophy
//!
//! - **Turn-Based**: one submission is handled to completion before the next
//! - **Data Out**: handlers return directives; only the machine talks to the presenter
//! - **Forward Only**: a stage that was left is never re-entered

pub mod error;
pub mod events;
pub mod machine;
pub mod presenter;
pub mod session;
pub mod stages;

pub use error::*;
pub use events::*;
pub use machine::*;
pub use presenter::*;
pub use session::*;
pub use stages::*;
