//! # Readymix CLI Application
//!
//! Terminal front end for the concrete quantity estimator. Reads commands
//! line by line, keeps one in-memory session, and prints the entry table and
//! truck summary after every change. Nothing is saved on exit.
//!
//! ```text
//! $ readymix --loss-rate 5
//! > add slab 10 5 0.2 1F slab
//! > add wall 10 2.5 0.2
//! > truck 7
//! > reset
//! ```

mod cli;
mod commands;
mod logger;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
