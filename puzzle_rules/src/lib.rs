//! # Puzzle Rules
//!
//! The rule book for IAgo - answer normalization, the word decoding puzzle,
//! the codename grid and the script table they are configured from.
//! This crate holds no presentation logic and no notion of stages.

pub mod constraint;
pub mod content;
pub mod text;
pub mod word_puzzle;

pub use constraint::*;
pub use content::*;
pub use text::*;
pub use word_puzzle::*;
