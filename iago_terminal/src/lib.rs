//! # IAgo Terminal
//!
//! Plays the IAgo sequence on a terminal. Lines are typed out one character
//! at a time, the gallows and the codename grid are drawn as text, and the
//! grid is answered by typing numbers from the printed legend.

pub mod audio;
pub mod cli;
pub mod error;
pub mod grid_input;
pub mod logging;
pub mod presenter;
pub mod session;

pub use error::TerminalError;
pub use session::run;
