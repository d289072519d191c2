// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and manipulation

use crate::{Color, Coord};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised by direct board mutation
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// The coordinate lies outside the board
    #[error("{0} is outside the board")]
    OutOfBounds(Coord),

    /// There is no stone to remove
    #[error("{0} is already empty")]
    EmptyCell(Coord),
}

/// Square board holding stones sparsely.
///
/// Keys are always on the board. Iteration order is by `x`, then `y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Side length of the board
    size: u8,
    /// Occupied cells
    stones: BTreeMap<Coord, Color>,
}

impl Board {
    /// Create a new empty board with the specified size
    pub fn new(size: u8) -> Self {
        Self {
            size,
            stones: BTreeMap::new(),
        }
    }

    /// Get the size of the board
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the coordinate lies on this board
    pub fn is_on_board(&self, coord: Coord) -> bool {
        coord.is_valid(self.size)
    }

    /// Whether the coordinate is on the board and unoccupied
    pub fn is_empty(&self, coord: Coord) -> bool {
        self.is_on_board(coord) && !self.stones.contains_key(&coord)
    }

    /// Get the stone at the specified coordinate
    pub fn stone_at(&self, coord: Coord) -> Option<Color> {
        self.stones.get(&coord).copied()
    }

    /// Place a stone, overwriting whatever was there
    pub fn place_stone(&mut self, coord: Coord, color: Color) -> Result<(), BoardError> {
        if !self.is_on_board(coord) {
            return Err(BoardError::OutOfBounds(coord));
        }
        self.stones.insert(coord, color);
        Ok(())
    }

    /// Remove the stone at the coordinate, returning its color
    pub fn clear_cell(&mut self, coord: Coord) -> Result<Color, BoardError> {
        if !self.is_on_board(coord) {
            return Err(BoardError::OutOfBounds(coord));
        }
        self.stones
            .remove(&coord)
            .ok_or(BoardError::EmptyCell(coord))
    }

    /// Remove every stone
    pub fn clear(&mut self) {
        self.stones.clear();
    }

    /// Flip the color of every stone in place
    pub fn swap_colors(&mut self) {
        for color in self.stones.values_mut() {
            *color = color.opposite();
        }
    }

    /// Occupied cells in (x, y) order
    pub fn stones(&self) -> impl Iterator<Item = (Coord, Color)> + '_ {
        self.stones.iter().map(|(coord, color)| (*coord, *color))
    }

    /// Number of stones on the board
    pub fn stone_count(&self) -> usize {
        self.stones.len()
    }

    /// Every coordinate on the board, in (x, y) order
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let size = i32::from(self.size);
        (0..size).flat_map(move |x| (0..size).map(move |y| Coord::new(x, y)))
    }

    /// Whether every cell holds a stone
    pub fn is_full(&self) -> bool {
        self.stones.len() == usize::from(self.size) * usize::from(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_and_clear() {
        let mut board = Board::new(5);
        let c = Coord::new(2, 3);
        assert!(board.is_empty(c));

        board.place_stone(c, Color::Black).unwrap();
        assert_eq!(board.stone_at(c), Some(Color::Black));
        assert!(!board.is_empty(c));

        assert_eq!(board.clear_cell(c), Ok(Color::Black));
        assert_eq!(board.clear_cell(c), Err(BoardError::EmptyCell(c)));
    }

    #[test]
    fn rejects_off_board() {
        let mut board = Board::new(3);
        for c in [Coord::new(-1, 0), Coord::new(0, 3), Coord::new(3, 3)] {
            assert!(!board.is_on_board(c));
            assert!(!board.is_empty(c));
            assert_eq!(
                board.place_stone(c, Color::White),
                Err(BoardError::OutOfBounds(c))
            );
        }
        assert_eq!(board.stone_count(), 0);
    }

    #[test]
    fn overwrite_keeps_single_entry() {
        let mut board = Board::new(3);
        let c = Coord::new(1, 1);
        board.place_stone(c, Color::Black).unwrap();
        board.place_stone(c, Color::White).unwrap();
        assert_eq!(board.stone_at(c), Some(Color::White));
        assert_eq!(board.stone_count(), 1);
    }

    #[test]
    fn stones_iterate_by_x_then_y() {
        let mut board = Board::new(4);
        board.place_stone(Coord::new(2, 0), Color::Black).unwrap();
        board.place_stone(Coord::new(0, 3), Color::White).unwrap();
        board.place_stone(Coord::new(0, 1), Color::Black).unwrap();

        let order: Vec<Coord> = board.stones().map(|(c, _)| c).collect();
        assert_eq!(
            order,
            vec![Coord::new(0, 1), Coord::new(0, 3), Coord::new(2, 0)]
        );
    }

    #[test]
    fn cells_cover_board() {
        let board = Board::new(3);
        assert_eq!(board.cells().count(), 9);
        assert!(board.cells().all(|c| board.is_on_board(c)));
    }

    #[test]
    fn clear_removes_every_stone() {
        let mut board = Board::new(3);
        board.place_stone(Coord::new(0, 0), Color::Black).unwrap();
        board.place_stone(Coord::new(1, 2), Color::White).unwrap();
        board.clear();
        assert_eq!(board.stone_count(), 0);
        assert!(board.cells().all(|c| board.is_empty(c)));
        assert_eq!(board.size(), 3);
    }

    #[test]
    fn swap_colors_keeps_positions() {
        let mut board = Board::new(3);
        board.place_stone(Coord::new(0, 0), Color::Black).unwrap();
        board.place_stone(Coord::new(2, 1), Color::White).unwrap();
        board.swap_colors();
        assert_eq!(board.stone_at(Coord::new(0, 0)), Some(Color::White));
        assert_eq!(board.stone_at(Coord::new(2, 1)), Some(Color::Black));
        assert_eq!(board.stone_count(), 2);
    }
}
