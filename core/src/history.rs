// SPDX-License-Identifier: MIT OR Apache-2.0

//! Linear undo/redo record of placed moves

use crate::Move;

/// Two-stack move history.
///
/// `past` is chronological. `future` is kept as a stack whose top is the most
/// recently undone move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    past: Vec<Move>,
    future: Vec<Move>,
}

impl History {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a history from its two sequences.
    ///
    /// `future` is ordered most recently undone first.
    pub fn from_parts(past: Vec<Move>, mut future: Vec<Move>) -> Self {
        future.reverse();
        Self { past, future }
    }

    /// Record a new move. Any undone moves are discarded.
    pub fn commit(&mut self, mv: Move) {
        self.past.push(mv);
        self.future.clear();
    }

    /// Step back one move, returning it
    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.past.pop()?;
        self.future.push(mv);
        Some(mv)
    }

    /// Step forward one move, returning it
    pub fn redo(&mut self) -> Option<Move> {
        let mv = self.future.pop()?;
        self.past.push(mv);
        Some(mv)
    }

    /// The move [`redo`](Self::redo) would replay, without replaying it
    pub fn next_redo(&self) -> Option<Move> {
        self.future.last().copied()
    }

    /// Flip the color of every recorded move, past and future
    pub fn swap_colors(&mut self) {
        for mv in self.past.iter_mut().chain(self.future.iter_mut()) {
            *mv = mv.swapped();
        }
    }

    /// Moves played so far, oldest first
    pub fn past_moves(&self) -> Vec<Move> {
        self.past.clone()
    }

    /// Undone moves, most recently undone first
    pub fn future_moves(&self) -> Vec<Move> {
        self.future.iter().rev().copied().collect()
    }

    /// Borrow the played moves without copying
    pub fn past(&self) -> &[Move] {
        &self.past
    }

    /// Whether there is anything to redo
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of moves played so far
    pub fn len(&self) -> usize {
        self.past.len()
    }

    /// Whether no move has been played
    pub fn is_empty(&self) -> bool {
        self.past.is_empty()
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}
