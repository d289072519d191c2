// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive session: applies commands to a game and reports the result.

use crate::command::{Command, HELP};
use crate::render;
use anyhow::{Context, Result};
use crossway_core::{record, Game, GameError};
use std::path::Path;

/// Whether the read loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read another command
    Continue,
    /// Stop reading
    Quit,
}

/// A game plus the controller logic around it
pub struct Session {
    game: Game,
}

impl Session {
    /// Start a session around an existing game
    pub fn new(game: Game) -> Self {
        Self { game }
    }

    /// Start a session from a saved JSON game
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::new(read_game(path)?))
    }

    /// The game being played
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Board, legend and status as shown after every change
    pub fn view(&self) -> String {
        format!(
            "{}\n{}\n{}",
            render::goal_legend(),
            render::render_board(&self.game),
            render::render_status(&self.game)
        )
    }

    /// Apply one command, appending anything to show to `out`.
    ///
    /// Game errors are reported in `out` and leave the session running; only
    /// file I/O failures are returned as errors.
    pub fn handle(&mut self, command: Command, out: &mut String) -> Result<Flow> {
        tracing::debug!(?command, "Handling command");
        let changed = match command {
            Command::Place(coord) => Self::report(self.game.play(coord), out),
            Command::Undo => Self::report(self.game.undo_last_move().map(|_| ()), out),
            Command::Redo => Self::report(self.game.redo_last_move().map(|_| ()), out),
            Command::Swap => Self::report(self.game.swap_colors(), out),
            Command::Skip => {
                self.game.skip_turn();
                true
            }
            Command::Legal => {
                let player = self.game.current_player();
                let moves: Vec<String> = self
                    .game
                    .legal_moves(player)
                    .into_iter()
                    .map(|c| format!("{}{}", render::coord_to_column_char(c.x as u8), c.y + 1))
                    .collect();
                out.push_str(&format!("{} may play: {}\n", player, moves.join(" ")));
                false
            }
            Command::Show => true,
            Command::Save(path) => {
                write_game(&self.game, &path)?;
                out.push_str(&format!("Saved to {}\n", path.display()));
                false
            }
            Command::Load(path) => {
                self.game = read_game(&path)?;
                out.push_str(&format!("Loaded {}\n", path.display()));
                true
            }
            Command::Restart => {
                self.game.restart();
                true
            }
            Command::Help => {
                out.push_str(HELP);
                out.push('\n');
                false
            }
            Command::Quit => return Ok(Flow::Quit),
        };

        if changed {
            self.force_forfeit(out);
            out.push_str(&self.view());
            out.push('\n');
        }
        Ok(Flow::Continue)
    }

    /// Pass the turn for a player who has nowhere to play
    fn force_forfeit(&mut self, out: &mut String) {
        let player = self.game.current_player();
        if self.game.winner().is_some() || self.game.has_legal_move(player) {
            return;
        }
        if !self.game.has_legal_move(player.opposite()) {
            out.push_str("Neither player can move.\n");
            return;
        }
        tracing::info!(%player, "No legal move, forfeiting turn");
        out.push_str(&format!("{} has no legal move and forfeits the turn.\n", player));
        self.game.skip_turn();
    }

    fn report(result: Result<(), GameError>, out: &mut String) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                out.push_str(&format!("{}\n", err));
                false
            }
        }
    }
}

fn write_game(game: &Game, path: &Path) -> Result<()> {
    let json = record::to_json(game).context("Failed to serialize game")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Game saved to {:?}", path);
    Ok(())
}

fn read_game(path: &Path) -> Result<Game> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let game = record::from_json(&json).with_context(|| format!("Invalid game file {}", path.display()))?;
    tracing::info!("Game loaded from {:?}", path);
    Ok(game)
}
