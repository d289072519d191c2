// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game rules and validation logic
//!
//! Rules are a closed, ordered set of pure predicates. Each one inspects the
//! board as if the candidate move were already on it, without touching it.

use crate::{board::Board, Color, Coord, Move};
use std::fmt;
use thiserror::Error;

/// A single placement rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// The stone must land on the board
    Bounds,
    /// The cell must be free
    Empty,
    /// The stone must not complete a diagonal X in any 2x2 block
    DiagonalX,
}

impl Rule {
    /// Evaluation order. Pattern analysis assumes a valid, empty cell, so it
    /// runs last.
    pub const ORDER: [Rule; 3] = [Rule::Bounds, Rule::Empty, Rule::DiagonalX];

    /// Stable identifier for this rule
    pub fn id(&self) -> &'static str {
        match self {
            Rule::Bounds => "bounds",
            Rule::Empty => "empty",
            Rule::DiagonalX => "diagonal-x",
        }
    }

    /// Check the move against this rule
    pub fn validate(&self, board: &Board, mv: &Move) -> Option<RuleViolation> {
        let broken = match self {
            Rule::Bounds => !board.is_on_board(mv.coord),
            Rule::Empty => !board.is_empty(mv.coord),
            Rule::DiagonalX => forms_diagonal_x(board, mv),
        };
        broken.then(|| RuleViolation::new(*self, mv.coord))
    }

    fn message(&self) -> &'static str {
        match self {
            Rule::Bounds => "Stone must be placed on the board",
            Rule::Empty => "Position already occupied",
            Rule::DiagonalX => "Move would form a diagonal X",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A broken rule, reported to the caller and never stored
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message} at {coord} [{rule}]")]
pub struct RuleViolation {
    /// The rule that failed
    pub rule: Rule,
    /// Human-readable explanation
    pub message: String,
    /// The offending coordinate
    pub coord: Coord,
}

impl RuleViolation {
    fn new(rule: Rule, coord: Coord) -> Self {
        Self {
            rule,
            message: rule.message().to_string(),
            coord,
        }
    }
}

/// Validates moves against every rule, in order
pub struct RuleValidator<'a> {
    /// The board being checked
    board: &'a Board,
}

impl<'a> RuleValidator<'a> {
    /// Create a new rules validator
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    /// The first rule the move breaks, if any
    pub fn first_violation(&self, mv: &Move) -> Option<RuleViolation> {
        Rule::ORDER
            .iter()
            .find_map(|rule| rule.validate(self.board, mv))
    }

    /// Every rule the move breaks, in evaluation order
    pub fn all_violations(&self, mv: &Move) -> Vec<RuleViolation> {
        // Pattern analysis is meaningless for an off-board coordinate.
        if let Some(v) = Rule::Bounds.validate(self.board, mv) {
            return vec![v];
        }
        Rule::ORDER
            .iter()
            .filter_map(|rule| rule.validate(self.board, mv))
            .collect()
    }

    /// Whether the move passes every rule
    pub fn is_allowed(&self, mv: &Move) -> bool {
        self.first_violation(mv).is_none()
    }

    /// Check a move, returning the first violation as an error
    pub fn check_move(&self, mv: &Move) -> Result<(), RuleViolation> {
        match self.first_violation(mv) {
            Some(v) => {
                tracing::debug!(rule = %v.rule, coord = %v.coord, "Move rejected");
                Err(v)
            }
            None => Ok(()),
        }
    }

    /// Every coordinate where `color` may currently play
    pub fn legal_moves(&self, color: Color) -> Vec<Coord> {
        self.board
            .cells()
            .filter(|&coord| self.is_allowed(&Move::new(coord, color)))
            .collect()
    }

    /// Whether `color` may play anywhere, stopping at the first legal cell
    pub fn has_legal_move(&self, color: Color) -> bool {
        self.board
            .cells()
            .any(|coord| self.is_allowed(&Move::new(coord, color)))
    }
}

/// Whether placing `mv` completes a diagonal X in a 2x2 block containing it
fn forms_diagonal_x(board: &Board, mv: &Move) -> bool {
    let color_at = |c: Coord| {
        if c == mv.coord {
            Some(mv.color)
        } else {
            board.stone_at(c)
        }
    };

    for ox in (mv.coord.x - 1)..=mv.coord.x {
        for oy in (mv.coord.y - 1)..=mv.coord.y {
            let top_left = Coord::new(ox, oy);
            let top_right = Coord::new(ox + 1, oy);
            let bottom_left = Coord::new(ox, oy + 1);
            let bottom_right = Coord::new(ox + 1, oy + 1);

            if ![top_left, top_right, bottom_left, bottom_right]
                .iter()
                .all(|&c| board.is_on_board(c))
            {
                continue;
            }

            let cells = (
                color_at(top_left),
                color_at(bottom_right),
                color_at(top_right),
                color_at(bottom_left),
            );
            if let (Some(a), Some(d), Some(b), Some(c)) = cells {
                if a == d && b == c && a != b {
                    return true;
                }
            }
        }
    }

    false
}
