//! Runs one terminal session: input reader thread plus the turn loop.
//!
//! The reader forwards stdin lines over a channel and drops any line typed
//! while the machine is still presenting output. The loop feeds each line to
//! the stage machine, as a typed grid when the grid stage is waiting for one.

use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use puzzle_rules::Content;
use stage_flow::{to_json_lines, BusyGate, StageEvent, StageMachine};
use tracing::{debug, info, warn};

use crate::audio::Soundtrack;
use crate::cli::Cli;
use crate::error::TerminalError;
use crate::grid_input::parse_grid;
use crate::presenter::TerminalPresenter;

/// Play a full session on stdin/stdout.
pub fn run(cli: &Cli) -> Result<(), TerminalError> {
    let content = match &cli.content {
        Some(path) => Content::load(path)?,
        None => Content::builtin()?,
    };
    let soundtrack = cli
        .audio
        .as_ref()
        .and_then(|path| Soundtrack::load(path, cli.audio_player.clone()));

    let stdout = io::stdout();
    let color = stdout.is_terminal() && std::env::var_os("NO_COLOR").is_none();
    let presenter = TerminalPresenter::new(stdout, cli.pacing())
        .with_color(color)
        .with_soundtrack(soundtrack);

    let mut machine = match cli.seed {
        Some(seed) => StageMachine::with_seed(content, presenter, seed),
        None => StageMachine::new(content, presenter),
    };

    let lines = spawn_reader(BufReader::new(io::stdin()), machine.busy_gate())
        .map_err(TerminalError::Reader)?;
    play(&mut machine, &lines)?;

    if let Some(path) = &cli.events_json {
        write_events(path, machine.events())?;
    }
    Ok(())
}

/// Forward input lines until EOF, skipping those typed while `gate` is held.
pub fn spawn_reader<R>(input: R, gate: BusyGate) -> io::Result<Receiver<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("iago-input".into())
        .spawn(move || {
            for line in input.lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        warn!(%err, "input read failed");
                        break;
                    }
                };
                if gate.is_busy() {
                    debug!("input dropped while presenting");
                    continue;
                }
                if tx.send(line).is_err() {
                    break;
                }
            }
        })?;
    Ok(rx)
}

/// Drive the machine until input closes or the flow stops taking input.
pub fn play<W: Write>(
    machine: &mut StageMachine<TerminalPresenter<W>>,
    lines: &Receiver<String>,
) -> Result<(), TerminalError> {
    machine.start();

    while machine.accepts_input() {
        let Ok(line) = lines.recv() else {
            info!("input closed");
            break;
        };

        if !machine.awaits_grid() {
            machine.submit(&line);
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        let grid = &machine.content().grid;
        match parse_grid(&line, &grid.labels, &grid.items) {
            Ok(candidate) => {
                machine.submit_grid(&candidate)?;
            }
            Err(err) => machine.presenter_mut().notice(&err.to_string()),
        }
    }

    info!(stage = %machine.stage_kind(), "session over");
    Ok(())
}

/// Save the event log as JSON lines.
pub fn write_events(path: &Path, events: &[StageEvent]) -> Result<(), TerminalError> {
    let json = to_json_lines(events)?;
    std::fs::write(path, json).map_err(|source| TerminalError::Write {
        path: path.to_path_buf(),
        source,
    })
}
