// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted game records
//!
//! The exchanged shape is:
//!
//! ```text
//! { board: { size, stones: [{ point: {x, y}, stone }] },
//!   history: { pastMoves: [Move], futureMoves: [Move] },
//!   currentPlayer, pieAvailable, pieTaken? }
//! ```
//!
//! `pieTaken` is written only once the swap has been used; a missing field
//! reads as `false`.
//!
//! Stones are listed by `x`, then `y`. Decoding validates the whole record
//! before anything is built, so a malformed record never yields a game.

use crate::{board::Board, history::History, Color, Coord, Game, GameError, Move};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// One occupied cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoneRecord {
    /// Cell
    pub point: Coord,
    /// Stone color
    pub stone: Color,
}

/// Board contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRecord {
    /// Side length
    pub size: u8,
    /// Occupied cells
    pub stones: Vec<StoneRecord>,
}

/// Move history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Played moves, oldest first
    pub past_moves: Vec<Move>,
    /// Undone moves, most recently undone first
    pub future_moves: Vec<Move>,
}

/// Complete saved game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    /// Board contents
    pub board: BoardRecord,
    /// Move history
    pub history: HistoryRecord,
    /// Player on turn
    pub current_player: Color,
    /// Whether the pie rule may still be taken
    pub pie_available: bool,
    /// Whether the pie rule has already been used
    #[serde(default, skip_serializing_if = "is_false")]
    pub pie_taken: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl GameRecord {
    /// Sort stones into canonical (x, y) order
    pub fn canonicalize(&mut self) {
        self.board.stones.sort_by_key(|s| s.point);
    }
}

impl Game {
    /// Snapshot this game as a record
    pub fn to_record(&self) -> GameRecord {
        let stones = self
            .board()
            .stones()
            .map(|(point, stone)| StoneRecord { point, stone })
            .collect();
        GameRecord {
            board: BoardRecord {
                size: self.size(),
                stones,
            },
            history: HistoryRecord {
                past_moves: self.history().past_moves(),
                future_moves: self.history().future_moves(),
            },
            current_player: self.current_player(),
            pie_available: self.is_pie_available(),
            pie_taken: self.is_pie_taken(),
        }
    }

    /// Rebuild a game from a record, rejecting anything inconsistent
    pub fn from_record(record: GameRecord) -> Result<Game, GameError> {
        validate(&record).map_err(|reason| {
            tracing::warn!(%reason, "Rejected game record");
            GameError::MalformedState(reason)
        })?;

        let GameRecord {
            board: board_record,
            history,
            current_player,
            pie_available,
            pie_taken,
        } = record;

        let mut board = Board::new(board_record.size);
        for s in &board_record.stones {
            board.place_stone(s.point, s.stone)?;
        }
        let history = History::from_parts(history.past_moves, history.future_moves);

        Ok(Game::from_parts(
            board,
            history,
            current_player,
            pie_available,
            pie_taken,
        ))
    }
}

fn validate(record: &GameRecord) -> Result<(), String> {
    let size = record.board.size;
    if size == 0 {
        return Err("board size must be positive".into());
    }

    let mut stones = BTreeMap::new();
    for s in &record.board.stones {
        if !s.point.is_valid(size) {
            return Err(format!("stone at {} is outside a {size}x{size} board", s.point));
        }
        if stones.insert(s.point, s.stone).is_some() {
            return Err(format!("two stones at {}", s.point));
        }
    }

    let mut played = BTreeMap::new();
    for mv in &record.history.past_moves {
        if !mv.coord.is_valid(size) {
            return Err(format!("past move at {} is off the board", mv.coord));
        }
        if played.insert(mv.coord, mv.color).is_some() {
            return Err(format!("past moves repeat {}", mv.coord));
        }
    }
    if played != stones {
        return Err("board does not match past moves".into());
    }

    let mut pending = HashSet::new();
    for mv in &record.history.future_moves {
        if !mv.coord.is_valid(size) {
            return Err(format!("future move at {} is off the board", mv.coord));
        }
        if stones.contains_key(&mv.coord) || !pending.insert(mv.coord) {
            return Err(format!("future move at {} targets an occupied cell", mv.coord));
        }
    }

    if record.pie_available && record.history.past_moves.len() != 1 {
        return Err("pie rule offered outside the first-move window".into());
    }
    if record.pie_available && record.pie_taken {
        return Err("pie rule offered after it was taken".into());
    }

    Ok(())
}

/// Encode a game as JSON
pub fn to_json(game: &Game) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&game.to_record())
}

/// Decode a game from JSON
pub fn from_json(data: &str) -> Result<Game, GameError> {
    let record: GameRecord = serde_json::from_str(data).map_err(|err| {
        tracing::warn!("Failed to parse game record: {}", err);
        GameError::MalformedState(err.to_string())
    })?;
    Game::from_record(record)
}

/// Encode a game as CBOR
pub fn to_cbor(game: &Game) -> Vec<u8> {
    match serde_cbor::to_vec(&game.to_record()) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!("Failed to serialize game record: {}", err);
            Vec::new()
        }
    }
}

/// Decode a game from CBOR
pub fn from_cbor(data: &[u8]) -> Result<Game, GameError> {
    if data.is_empty() {
        return Err(GameError::MalformedState("empty CBOR payload".into()));
    }
    let record: GameRecord = serde_cbor::from_slice(data).map_err(|err| {
        tracing::warn!("Failed to deserialize game record: {}", err);
        GameError::MalformedState(err.to_string())
    })?;
    Game::from_record(record)
}
