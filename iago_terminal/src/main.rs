//! `iago` - play the IAgo sequence in a terminal.

use clap::Parser;

use iago_terminal::cli::Cli;
use iago_terminal::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = iago_terminal::run(&cli) {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}
