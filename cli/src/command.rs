// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsing of interactive commands.

use crate::render::column_char_to_coord;
use anyhow::{anyhow, Result};
use crossway_core::Coord;
use std::path::PathBuf;

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Place a stone for the player on turn
    Place(Coord),
    /// Take back the last move
    Undo,
    /// Replay the last undone move
    Redo,
    /// Take the pie rule
    Swap,
    /// Forfeit the turn
    Skip,
    /// List legal moves for the player on turn
    Legal,
    /// Redraw the board
    Show,
    /// Write the game to a JSON file
    Save(PathBuf),
    /// Replace the game with one read from a JSON file
    Load(PathBuf),
    /// Start over
    Restart,
    /// Print the command list
    Help,
    /// Leave
    Quit,
}

/// Help text listing every command
pub const HELP: &str = "\
Commands:
  <col><row>    place a stone, e.g. 'C3'
  undo | redo   step through history
  swap          take the pie rule (right after the first move)
  skip          forfeit your turn
  legal         list your legal moves
  show          redraw the board
  save <file>   write the game as JSON
  load <file>   read a game from JSON
  restart       start over
  help | quit";

/// Parse a command line
pub fn parse_command(input: &str) -> Result<Command> {
    let mut words = input.split_whitespace();
    let head = words
        .next()
        .ok_or_else(|| anyhow!("Empty command. Type 'help' for a list."))?;
    let path = |words: &mut std::str::SplitWhitespace<'_>| {
        words
            .next()
            .map(PathBuf::from)
            .ok_or_else(|| anyhow!("'{}' needs a file path", head))
    };

    let command = match head.to_lowercase().as_str() {
        "undo" | "u" => Command::Undo,
        "redo" | "r" => Command::Redo,
        "swap" => Command::Swap,
        "skip" | "pass" => Command::Skip,
        "legal" => Command::Legal,
        "show" => Command::Show,
        "save" => Command::Save(path(&mut words)?),
        "load" => Command::Load(path(&mut words)?),
        "restart" => Command::Restart,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Place(parse_coord(head)?),
    };
    Ok(command)
}

/// Parse a coordinate like "D4". Bounds are left to the game rules.
pub fn parse_coord(input: &str) -> Result<Coord> {
    let mut chars = input.chars();
    let col_char = chars
        .next()
        .ok_or_else(|| anyhow!("Missing coordinate"))?;
    let col = column_char_to_coord(col_char)
        .ok_or_else(|| anyhow!("Invalid column '{}'. Use A-Z, skipping I.", col_char))?;
    let row: i32 = chars
        .as_str()
        .parse()
        .map_err(|_| anyhow!("Invalid move format. Examples: 'C3', 'undo', 'help'."))?;

    // Rows are shown 1-indexed.
    Ok(Coord::new(i32::from(col), row.saturating_sub(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_place() {
        assert_eq!(parse_command("D4").unwrap(), Command::Place(Coord::new(3, 3)));
        assert_eq!(parse_command("j1").unwrap(), Command::Place(Coord::new(8, 0)));
        // Off-board rows still parse; the rules reject them later.
        assert_eq!(parse_command("A0").unwrap(), Command::Place(Coord::new(0, -1)));
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(parse_command(" undo ").unwrap(), Command::Undo);
        assert_eq!(parse_command("PASS").unwrap(), Command::Skip);
        assert_eq!(
            parse_command("save game.json").unwrap(),
            Command::Save(PathBuf::from("game.json"))
        );
        assert!(parse_command("load").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_command("").is_err());
        assert!(parse_command("I3").is_err());
        assert!(parse_command("Cx").is_err());
    }
}
