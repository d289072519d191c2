// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game orchestration: turn order, pie rule, undo/redo and win detection.
//!
//! `Game` is the only owner of its board, connectivity forest and history.
//! Every public operation either completes fully or returns an error having
//! changed nothing.

use crate::{
    board::Board, connectivity::Connectivity, history::History, rules::RuleValidator, Color, Coord,
    GameError, HistoryDirection, Move,
};
use serde::{Deserialize, Serialize};

/// Color that opens every game
pub const FIRST_PLAYER: Color = Color::Black;

/// Where the game stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Waiting for this color to move
    AwaitingMove(Color),
    /// This color has joined its edges
    Won(Color),
}

/// A Crossway game
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    connectivity: Connectivity,
    history: History,
    current_player: Color,
    pie_available: bool,
    pie_taken: bool,
}

impl Game {
    /// Create a new game on a `size` x `size` board.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero. Use [`Game::try_new`] for untrusted sizes.
    pub fn new(size: u8) -> Self {
        assert!(size > 0, "board size must be positive");
        Self {
            board: Board::new(size),
            connectivity: Connectivity::new(size),
            history: History::new(),
            current_player: FIRST_PLAYER,
            pie_available: false,
            pie_taken: false,
        }
    }

    /// Create a new game, rejecting a zero size
    pub fn try_new(size: u8) -> Result<Self, GameError> {
        if size == 0 {
            return Err(GameError::MalformedState("board size must be positive".into()));
        }
        Ok(Self::new(size))
    }

    /// Assemble a game from already-validated parts, rebuilding connectivity
    /// from the played moves
    pub(crate) fn from_parts(
        board: Board,
        history: History,
        current_player: Color,
        pie_available: bool,
        pie_taken: bool,
    ) -> Self {
        let connectivity = Connectivity::replay(board.size(), history.past());
        Self {
            board,
            connectivity,
            history,
            current_player,
            pie_available,
            pie_taken,
        }
    }

    /// Read access to the board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side length of the board
    pub fn size(&self) -> u8 {
        self.board.size()
    }

    /// The player whose turn it is
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    /// Whether the second player may still swap sides
    pub fn is_pie_available(&self) -> bool {
        self.pie_available
    }

    /// Whether the pie rule has been used in this game
    pub fn is_pie_taken(&self) -> bool {
        self.pie_taken
    }

    /// Played moves, oldest first
    pub fn move_history(&self) -> Vec<Move> {
        self.history.past_moves()
    }

    /// Undone moves, most recently undone first
    pub fn future_moves(&self) -> Vec<Move> {
        self.history.future_moves()
    }

    /// Whether there is a move to undo
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Whether there is a move to redo
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Apply a move for the player on turn.
    ///
    /// The move's color must match [`current_player`](Self::current_player).
    pub fn make_move(&mut self, mv: Move) -> Result<(), GameError> {
        if mv.color != self.current_player {
            return Err(GameError::OutOfTurn {
                expected: self.current_player,
                got: mv.color,
            });
        }
        RuleValidator::new(&self.board).check_move(&mv)?;

        self.board.place_stone(mv.coord, mv.color)?;
        self.connectivity.checkpoint();
        self.connectivity.on_place(&self.board, mv);
        self.history.commit(mv);
        self.current_player = mv.color.opposite();
        self.pie_available = self.pie_window();

        tracing::debug!(coord = %mv.coord, color = %mv.color, moves = self.history.len(), "Move made");
        Ok(())
    }

    /// Place a stone for the player on turn
    pub fn play(&mut self, coord: Coord) -> Result<(), GameError> {
        self.make_move(Move::new(coord, self.current_player))
    }

    /// Pass the turn without placing a stone. Not recorded in history.
    pub fn skip_turn(&mut self) {
        tracing::debug!(color = %self.current_player, "Turn forfeited");
        self.current_player = self.current_player.opposite();
    }

    /// Whether `color` has any legal placement
    pub fn has_legal_move(&self, color: Color) -> bool {
        RuleValidator::new(&self.board).has_legal_move(color)
    }

    /// Every legal placement for `color`
    pub fn legal_moves(&self, color: Color) -> Vec<Coord> {
        RuleValidator::new(&self.board).legal_moves(color)
    }

    /// Take the pie rule: the second player adopts the first move as their own.
    ///
    /// Stones keep their positions but change color, so each player keeps the
    /// edges tied to their color.
    pub fn swap_colors(&mut self) -> Result<(), GameError> {
        if !self.pie_available {
            return Err(GameError::PieUnavailable);
        }
        self.history.swap_colors();
        self.board.swap_colors();
        self.connectivity = Connectivity::replay(self.board.size(), self.history.past());
        self.current_player = self.current_player.opposite();
        self.pie_available = false;
        self.pie_taken = true;

        tracing::debug!(to_move = %self.current_player, "Pie rule taken");
        Ok(())
    }

    /// Take back the most recent move
    pub fn undo_last_move(&mut self) -> Result<Move, GameError> {
        let mv = *self
            .history
            .past()
            .last()
            .ok_or(GameError::NoHistory(HistoryDirection::Undo))?;

        self.board.clear_cell(mv.coord)?;
        self.history.undo();
        if !self.connectivity.rollback() {
            tracing::warn!("No connectivity checkpoint, rebuilding");
            self.connectivity = Connectivity::replay(self.board.size(), self.history.past());
        }
        self.current_player = mv.color;
        self.pie_available = self.pie_window();

        tracing::debug!(coord = %mv.coord, color = %mv.color, "Move undone");
        Ok(mv)
    }

    /// Replay the most recently undone move
    pub fn redo_last_move(&mut self) -> Result<Move, GameError> {
        let mv = self
            .history
            .next_redo()
            .ok_or(GameError::NoHistory(HistoryDirection::Redo))?;

        self.board.place_stone(mv.coord, mv.color)?;
        self.history.redo();
        self.connectivity.checkpoint();
        self.connectivity.on_place(&self.board, mv);
        self.current_player = mv.color.opposite();
        self.pie_available = self.pie_window();

        tracing::debug!(coord = %mv.coord, color = %mv.color, "Move redone");
        Ok(mv)
    }

    /// Whether `color` has joined its two edges
    pub fn has_won(&self, color: Color) -> bool {
        self.connectivity.has_won(color)
    }

    /// The color that has joined its edges, if any
    pub fn winner(&self) -> Option<Color> {
        [Color::Black, Color::White]
            .into_iter()
            .find(|&color| self.has_won(color))
    }

    /// Current status. A won game still accepts moves; stopping is up to the
    /// caller.
    pub fn status(&self) -> GameStatus {
        match self.winner() {
            Some(color) => GameStatus::Won(color),
            None => GameStatus::AwaitingMove(self.current_player),
        }
    }

    /// Clear everything and start over at the same size
    pub fn restart(&mut self) {
        self.board.clear();
        self.connectivity = Connectivity::new(self.board.size());
        self.history.clear();
        self.current_player = FIRST_PLAYER;
        self.pie_available = false;
        self.pie_taken = false;
        tracing::debug!(size = self.board.size(), "Game restarted");
    }

    /// Exactly one move played and the swap not yet used
    fn pie_window(&self) -> bool {
        self.history.len() == 1 && !self.pie_taken
    }

    pub(crate) fn history(&self) -> &History {
        &self.history
    }

    #[cfg(test)]
    pub(crate) fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;

    fn at(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn turns_alternate() {
        let mut game = Game::new(5);
        assert_eq!(game.current_player(), Color::Black);
        game.play(at(2, 2)).unwrap();
        assert_eq!(game.current_player(), Color::White);
    }

    #[test]
    fn out_of_turn_move_rejected() {
        let mut game = Game::new(5);
        let err = game
            .make_move(Move::new(at(0, 0), Color::White))
            .unwrap_err();
        assert_eq!(
            err,
            GameError::OutOfTurn {
                expected: Color::Black,
                got: Color::White
            }
        );
        assert_eq!(game.board().stone_count(), 0);
        assert!(game.move_history().is_empty());
    }

    #[test]
    fn rejected_move_changes_nothing() {
        let mut game = Game::new(3);
        game.play(at(1, 1)).unwrap();
        let board = game.board().clone();
        let history = game.move_history();

        match game.play(at(1, 1)) {
            Err(GameError::IllegalMove(v)) => assert_eq!(v.rule, Rule::Empty),
            other => panic!("expected occupied-cell violation, got {:?}", other),
        }
        assert_eq!(game.board(), &board);
        assert_eq!(game.move_history(), history);
        assert_eq!(game.current_player(), Color::White);
    }

    #[test]
    fn pie_window_opens_and_closes() {
        let mut game = Game::new(5);
        assert!(!game.is_pie_available());
        game.play(at(1, 1)).unwrap();
        assert!(game.is_pie_available());
        game.play(at(3, 3)).unwrap();
        assert!(!game.is_pie_available());
        assert_eq!(game.swap_colors(), Err(GameError::PieUnavailable));
    }

    #[test]
    fn swap_recolors_stone_and_flips_turn() {
        let mut game = Game::new(3);
        game.play(at(0, 1)).unwrap();
        game.swap_colors().unwrap();

        assert_eq!(game.board().stone_at(at(0, 1)), Some(Color::White));
        assert_eq!(game.current_player(), Color::Black);
        assert!(!game.is_pie_available());
        assert_eq!(game.move_history(), vec![Move::new(at(0, 1), Color::White)]);
        assert_eq!(game.connectivity(), &Connectivity::init_from_board(game.board()));
    }

    #[test]
    fn undo_after_swap_keeps_pie_closed() {
        let mut game = Game::new(4);
        game.play(at(0, 1)).unwrap();
        game.swap_colors().unwrap();
        game.play(at(2, 2)).unwrap();
        game.undo_last_move().unwrap();
        assert!(!game.is_pie_available());
        assert_eq!(game.current_player(), Color::Black);
    }

    #[test]
    fn undo_reopens_pie_window() {
        let mut game = Game::new(4);
        game.play(at(0, 1)).unwrap();
        game.play(at(2, 2)).unwrap();
        game.undo_last_move().unwrap();
        assert!(game.is_pie_available());
    }

    #[test]
    fn redo_restores_pie_after_leading_skip() {
        let mut game = Game::new(4);
        game.skip_turn();
        game.play(at(1, 1)).unwrap();
        assert!(game.is_pie_available());

        game.undo_last_move().unwrap();
        assert!(!game.is_pie_available());
        game.redo_last_move().unwrap();
        assert!(game.is_pie_available());
        assert_eq!(game.current_player(), Color::Black);
    }

    #[test]
    fn pie_cannot_be_taken_twice() {
        let mut game = Game::new(4);
        game.skip_turn();
        game.play(at(1, 1)).unwrap();
        game.swap_colors().unwrap();
        assert!(game.is_pie_taken());

        game.undo_last_move().unwrap();
        game.redo_last_move().unwrap();
        assert!(!game.is_pie_available());
        assert_eq!(game.swap_colors(), Err(GameError::PieUnavailable));
        assert_eq!(game.move_history(), vec![Move::new(at(1, 1), Color::Black)]);
    }

    #[test]
    fn failed_undo_keeps_history() {
        let mut history = History::new();
        history.commit(Move::new(at(0, 0), Color::Black));
        let mut game = Game::from_parts(Board::new(3), history, Color::White, false, false);

        assert_eq!(
            game.undo_last_move(),
            Err(GameError::Board(crate::board::BoardError::EmptyCell(at(0, 0))))
        );
        assert_eq!(game.move_history(), vec![Move::new(at(0, 0), Color::Black)]);
        assert!(!game.can_redo());
        assert_eq!(game.current_player(), Color::White);
    }

    #[test]
    fn undo_and_redo_on_empty_history() {
        let mut game = Game::new(3);
        assert_eq!(
            game.undo_last_move(),
            Err(GameError::NoHistory(HistoryDirection::Undo))
        );
        assert_eq!(
            game.redo_last_move(),
            Err(GameError::NoHistory(HistoryDirection::Redo))
        );
    }

    #[test]
    fn skip_turn_is_not_undoable() {
        let mut game = Game::new(3);
        game.skip_turn();
        assert_eq!(game.current_player(), Color::White);
        assert!(!game.can_undo());
    }

    #[test]
    fn status_reports_winner() {
        let mut game = Game::new(3);
        game.play(at(0, 0)).unwrap();
        game.play(at(1, 0)).unwrap();
        game.play(at(2, 2)).unwrap();
        game.play(at(1, 1)).unwrap();
        game.play(at(0, 2)).unwrap();
        assert_eq!(game.status(), GameStatus::AwaitingMove(Color::White));
        game.play(at(1, 2)).unwrap();
        assert_eq!(game.status(), GameStatus::Won(Color::White));
        assert_eq!(game.winner(), Some(Color::White));
    }

    #[test]
    fn restart_clears_state() {
        let mut game = Game::new(4);
        game.play(at(1, 1)).unwrap();
        game.swap_colors().unwrap();
        game.play(at(2, 2)).unwrap();
        game.undo_last_move().unwrap();
        game.restart();
        assert_eq!(game.board().stone_count(), 0);
        assert!(!game.can_undo());
        assert!(!game.can_redo());
        assert!(!game.is_pie_taken());
        assert_eq!(game.current_player(), Color::Black);
        assert_eq!(game.size(), 4);
        assert_eq!(game.connectivity(), &Connectivity::new(4));

        game.play(at(0, 0)).unwrap();
        assert!(game.is_pie_available());
    }

    #[test]
    fn random_play_keeps_forest_in_sync() {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let size = rng.gen_range(2..=7u8);
            let mut game = Game::new(size);
            for _ in 0..200 {
                match rng.gen_range(0..10) {
                    0..=5 => {
                        let legal = game.legal_moves(game.current_player());
                        if legal.is_empty() {
                            game.skip_turn();
                        } else {
                            let coord = legal[rng.gen_range(0..legal.len())];
                            game.play(coord).unwrap();
                        }
                    }
                    6 | 7 => {
                        let _ = game.undo_last_move();
                    }
                    8 => {
                        let _ = game.redo_last_move();
                    }
                    _ => {
                        let _ = game.swap_colors();
                    }
                }
                assert_eq!(game.connectivity(), &Connectivity::init_from_board(game.board()));
                assert_eq!(game.connectivity().checkpoint_depth(), game.move_history().len());
            }
        }
    }

    #[test]
    fn try_new_rejects_zero() {
        assert!(matches!(Game::try_new(0), Err(GameError::MalformedState(_))));
    }
}
