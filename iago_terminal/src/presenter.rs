//! Terminal rendering: typed-out lines, the gallows frame, the grid legend.

use std::io::{self, Write};
use std::thread;

use puzzle_rules::{VocabEntry, HIDDEN_GLYPH};
use stage_flow::{Presenter, PuzzleFrame};
use tracing::{debug, info, warn};

use crate::audio::Soundtrack;
use crate::cli::Pacing;

const PROMPT: &str = "> ";
const RESET: &str = "\x1b[0m";
const BELL: &str = "\x07";

/// ANSI color for a named theme.
fn theme_color(theme: &str) -> Option<&'static str> {
    match theme {
        "pink-mode" => Some("\x1b[95m"),
        _ => None,
    }
}

/// Presenter that writes to a terminal (or any writer).
pub struct TerminalPresenter<W: Write> {
    out: W,
    pacing: Pacing,
    color: bool,
    accent: Option<&'static str>,
    soundtrack: Option<Soundtrack>,
    input_enabled: bool,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, pacing: Pacing) -> Self {
        Self {
            out,
            pacing,
            color: false,
            accent: None,
            soundtrack: None,
            input_enabled: false,
        }
    }

    /// Allow ANSI colors once a theme is set.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_soundtrack(mut self, soundtrack: Option<Soundtrack>) -> Self {
        self.soundtrack = soundtrack;
        self
    }

    /// Print a line immediately, outside the typing animation.
    pub fn notice(&mut self, text: &str) {
        let result = writeln!(self.out, "{text}").and_then(|_| self.prompt_if_enabled());
        report(result);
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn type_line(&mut self, line: &str) -> io::Result<()> {
        if let Some(accent) = self.accent {
            write!(self.out, "{accent}")?;
        }
        if self.pacing.char_delay.is_zero() {
            write!(self.out, "{line}")?;
        } else {
            for c in line.chars() {
                write!(self.out, "{c}")?;
                self.out.flush()?;
                thread::sleep(self.pacing.char_delay);
            }
        }
        if self.accent.is_some() {
            write!(self.out, "{RESET}")?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        if !self.pacing.line_delay.is_zero() {
            thread::sleep(self.pacing.line_delay);
        }
        Ok(())
    }

    fn write_frame(&mut self, frame: &PuzzleFrame) -> io::Result<()> {
        let view = &frame.view;
        let masked: Vec<String> = view
            .masked(HIDDEN_GLYPH)
            .chars()
            .map(|c| c.to_string())
            .collect();

        writeln!(self.out)?;
        writeln!(self.out, "{}", frame.art)?;
        writeln!(self.out)?;
        writeln!(self.out, "    {}", masked.join(" "))?;
        writeln!(self.out)?;
        writeln!(self.out, "Dica: {}", view.hint)?;
        writeln!(
            self.out,
            "Palavra {}/{} | Erros {}/{}",
            view.word_index + 1,
            view.word_count,
            view.wrong_guesses,
            view.error_budget
        )?;
        if !view.guesses.is_empty() {
            writeln!(self.out, "Tentativas: {}", view.guesses.join(", "))?;
        }
        self.out.flush()
    }

    fn write_grid(&mut self, labels: &[VocabEntry], items: &[VocabEntry]) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Codinomes: {}", legend(labels))?;
        writeln!(self.out, "Armas:     {}", legend(items))?;
        writeln!(self.out)?;
        writeln!(
            self.out,
            "Para cada quarto, da esquerda para a direita, digite o número do codinome"
        )?;
        writeln!(
            self.out,
            "e depois o da arma, em dois grupos de 5 (use - para deixar vazio)."
        )?;
        writeln!(self.out, "Exemplo: 1-3-5 24---")?;
        self.out.flush()
    }

    fn prompt_if_enabled(&mut self) -> io::Result<()> {
        if self.input_enabled {
            write!(self.out, "{PROMPT}")?;
            self.out.flush()?;
        }
        Ok(())
    }
}

fn legend(entries: &[VocabEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}) {}", i + 1, entry.name))
        .collect::<Vec<_>>()
        .join("  ")
}

fn report(result: io::Result<()>) {
    if let Err(err) = result {
        warn!(%err, "terminal write failed");
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn show_lines(&mut self, lines: &[String]) {
        for line in lines {
            if let Err(err) = self.type_line(line) {
                warn!(%err, "terminal write failed");
                return;
            }
        }
    }

    fn render_word_puzzle(&mut self, frame: &PuzzleFrame) {
        report(self.write_frame(frame));
    }

    fn render_constraint_grid(&mut self, labels: &[VocabEntry], items: &[VocabEntry]) {
        report(self.write_grid(labels, items));
    }

    fn show_final_scene(&mut self, text: &str) {
        let rule = "=".repeat(text.chars().count() + 4);
        report(
            writeln!(self.out, "\n{rule}\n  {text}\n{rule}\n").and_then(|_| self.out.flush()),
        );
    }

    fn play_audio(&mut self) {
        let Some(track) = &self.soundtrack else {
            debug!("no soundtrack configured");
            return;
        };
        match track.play() {
            Ok(true) => info!(path = %track.path().display(), "soundtrack started"),
            Ok(false) => report(write!(self.out, "{BELL}").and_then(|_| self.out.flush())),
            Err(err) => warn!(%err, "soundtrack could not be played"),
        }
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        let was_enabled = self.input_enabled;
        self.input_enabled = enabled;
        if enabled && !was_enabled {
            report(self.prompt_if_enabled());
        }
    }

    fn set_theme(&mut self, theme: &str) {
        debug!(theme, "theme switched");
        if self.color {
            self.accent = theme_color(theme);
        }
    }
}
