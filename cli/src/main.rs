// SPDX-License-Identifier: MIT OR Apache-2.0

//! Crossway CLI - Command-line interface
//!
//! A headless, line-oriented front end for playing and inspecting Crossway
//! games. Board output goes to stdout; logs go to stderr.

mod command;
mod render;
mod session;

use anyhow::{anyhow, Result};
use clap::Parser;
use crossway_core::Game;
use render::MAX_RENDER_SIZE;
use session::{Flow, Session};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(
    name = "crossway-cli",
    about = "Crossway game command-line interface",
    version
)]
struct Args {
    /// Board size (1 to 25)
    #[clap(short, long, default_value = "8")]
    size: u8,

    /// Resume a game saved as JSON
    #[clap(short, long)]
    load: Option<PathBuf>,

    /// Enable debug logging
    #[clap(long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Main entry point
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let mut session = match &args.load {
        Some(path) => Session::load(path)?,
        None => {
            if !(1..=MAX_RENDER_SIZE).contains(&args.size) {
                return Err(anyhow!(
                    "Invalid board size. Must be between 1 and {}.",
                    MAX_RENDER_SIZE
                ));
            }
            Session::new(Game::new(args.size))
        }
    };
    if session.game().size() > MAX_RENDER_SIZE {
        return Err(anyhow!("Saved board is too large to display"));
    }
    tracing::info!(size = session.game().size(), "Starting session");

    println!("{}", session.view());
    println!("Type 'help' for commands.");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match command::parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        let mut out = String::new();
        match session.handle(command, &mut out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => eprintln!("Error: {:#}", e),
        }
        write!(stdout, "{}", out)?;
        stdout.flush()?;
    }

    Ok(())
}
