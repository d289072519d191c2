// SPDX-License-Identifier: MIT OR Apache-2.0

//! Crossway Core - Game Rules and Board Logic
//!
//! This crate provides the move-legality and game-state engine:
//! - Square board representation with sparse stone storage
//! - Rule pipeline (bounds, occupancy, forbidden diagonal X)
//! - Incremental connectivity tracking with checkpoint/rollback
//! - Reversible move history with pie-rule color swap
//! - Persisted game records (JSON and CBOR)

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod connectivity;
pub mod game;
pub mod history;
pub mod record;
pub mod rules;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use board::{Board, BoardError};
pub use connectivity::Connectivity;
pub use game::{Game, GameStatus};
pub use history::History;
pub use record::GameRecord;
pub use rules::{Rule, RuleValidator, RuleViolation};

/// Player color in a Crossway game.
///
/// Black connects the west and east edges, White connects north and south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Black player (moves first, joins x = 0 to x = size - 1)
    Black,
    /// White player (joins y = 0 to y = size - 1)
    White,
}

impl Color {
    /// Returns the opposite color
    pub fn opposite(&self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// Board coordinate.
///
/// Signed so that off-board requests can be expressed and rejected by the
/// rule pipeline instead of failing to construct. Ordering is by `x`, then `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column)
    pub x: i32,
    /// Y coordinate (row)
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Check if coordinate is valid for a board of given size
    pub fn is_valid(&self, board_size: u8) -> bool {
        let size = i32::from(board_size);
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }

    /// Get the eight surrounding coordinates, unfiltered by board bounds
    pub fn neighbors(&self) -> impl Iterator<Item = Coord> + '_ {
        (-1..=1).flat_map(move |dx| {
            (-1..=1)
                .filter(move |&dy| dx != 0 || dy != 0)
                .map(move |dy| Coord::new(self.x + dx, self.y + dy))
        })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A stone placement, used both as a request and as a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Where the stone goes
    #[serde(rename = "point")]
    pub coord: Coord,
    /// Color of the stone
    #[serde(rename = "stone")]
    pub color: Color,
}

impl Move {
    /// Create a new move
    pub fn new(coord: Coord, color: Color) -> Self {
        Self { coord, color }
    }

    /// Same placement with the opposite color
    pub fn swapped(&self) -> Self {
        Self::new(self.coord, self.color.opposite())
    }
}

/// Which history stack an operation tried to pop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    /// Nothing left to undo
    Undo,
    /// Nothing left to redo
    Redo,
}

impl fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryDirection::Undo => write!(f, "undo"),
            HistoryDirection::Redo => write!(f, "redo"),
        }
    }
}

/// Errors that can occur during game play
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The move broke a placement rule
    #[error("Illegal move: {0}")]
    IllegalMove(#[from] RuleViolation),

    /// The requested history stack is empty
    #[error("Nothing to {0}")]
    NoHistory(HistoryDirection),

    /// The move was submitted for the player not on turn
    #[error("It is {expected}'s turn, not {got}'s")]
    OutOfTurn {
        /// Player on turn
        expected: Color,
        /// Color carried by the rejected move
        got: Color,
    },

    /// Direct board mutation failed
    #[error("Board error: {0}")]
    Board(#[from] BoardError),

    /// The pie rule can only be taken right after the first move
    #[error("Pie rule is not available")]
    PieUnavailable,

    /// A persisted game could not be turned back into a consistent game
    #[error("Malformed game state: {0}")]
    MalformedState(String),
}
