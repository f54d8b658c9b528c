//! Command-line options for the `iago` binary.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};

/// Play the IAgo sequence in the terminal.
#[derive(Parser, Debug)]
#[command(name = "iago", author, version, about)]
pub struct Cli {
    /// Alternative script table (TOML). Defaults to the built-in one.
    #[arg(long, env = "IAGO_CONTENT")]
    pub content: Option<PathBuf>,

    /// Seed for the error-line picker, for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print lines at once instead of typing them out.
    #[arg(long)]
    pub instant: bool,

    /// Delay between typed characters.
    #[arg(long, default_value_t = 30)]
    pub char_delay_ms: u64,

    /// Pause after each fully typed line.
    #[arg(long, default_value_t = 400)]
    pub line_delay_ms: u64,

    /// Soundtrack played at the ending. Missing or unreadable files are skipped.
    #[arg(long, env = "IAGO_AUDIO")]
    pub audio: Option<PathBuf>,

    /// External command used to play the soundtrack, e.g. `aplay` or `afplay`.
    #[arg(long, requires = "audio")]
    pub audio_player: Option<String>,

    /// Write the flow event log as JSON lines when the session ends.
    #[arg(long)]
    pub events_json: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn pacing(&self) -> Pacing {
        if self.instant {
            return Pacing::instant();
        }
        Pacing {
            char_delay: Duration::from_millis(self.char_delay_ms),
            line_delay: Duration::from_millis(self.line_delay_ms),
        }
    }
}

/// Typing animation timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub char_delay: Duration,
    pub line_delay: Duration,
}

impl Pacing {
    pub fn instant() -> Self {
        Self {
            char_delay: Duration::ZERO,
            line_delay: Duration::ZERO,
        }
    }

    pub fn is_instant(&self) -> bool {
        self.char_delay.is_zero() && self.line_delay.is_zero()
    }
}
