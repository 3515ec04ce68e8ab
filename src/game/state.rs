use serde::Serialize;

use super::{Board, CombinationIndex, Player, Position};
use crate::error::MoveError;

/// Result of the terminal check after a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Continue,
    Win(Player),
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Continue
    }
}

/// Decide whether the piece `player` just placed at `last_move` ended the game.
///
/// A completed line wins even when the same move fills the board. Lines with
/// cells outside `board` never match.
pub fn check_terminal(
    board: &Board,
    player: Player,
    piece_count: usize,
    index: &CombinationIndex,
    last_move: Position,
) -> Outcome {
    let mark = player.to_cell();
    let won = index.lines_through(last_move).iter().any(|line| {
        line.cells()
            .iter()
            .all(|&pos| board.cell_at(pos) == Some(mark))
    });

    if won {
        Outcome::Win(player)
    } else if piece_count == board.capacity() {
        Outcome::Draw
    } else {
        Outcome::Continue
    }
}

/// One game on a shared index: board, piece counter, side to move and outcome.
#[derive(Debug, Clone)]
pub struct GameState<'a> {
    index: &'a CombinationIndex,
    board: Board,
    current_player: Player,
    piece_count: usize,
    last_move: Option<Position>,
    outcome: Option<Outcome>,
}

impl<'a> GameState<'a> {
    /// Create the initial state for the board shape `index` was built for.
    /// X moves first.
    pub fn new(index: &'a CombinationIndex) -> Self {
        let (rows, cols) = index.shape();
        GameState {
            index,
            board: Board::new(rows, cols),
            current_player: Player::X,
            piece_count: 0,
            last_move: None,
            outcome: None,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece_count(&self) -> usize {
        self.piece_count
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.open_columns()
    }

    /// Drop the current player's piece into `column` and run the terminal check.
    ///
    /// The side to move only changes on [`Outcome::Continue`]; a failed move
    /// changes nothing.
    pub fn play(&mut self, column: usize) -> Result<Outcome, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let player = self.current_player;
        let pos = self.board.place_piece(player, column)?;
        self.piece_count += 1;
        self.last_move = Some(pos);
        log::trace!("{} -> {} (piece {})", player.name(), pos, self.piece_count);

        let outcome = check_terminal(&self.board, player, self.piece_count, self.index, pos);
        match outcome {
            Outcome::Continue => self.current_player = player.other(),
            terminal => {
                log::debug!("game over after {} pieces: {:?}", self.piece_count, terminal);
                self.outcome = Some(terminal);
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::super::Cell;
    use super::*;

    #[test]
    fn test_initial_state() {
        let index = CombinationIndex::build(6, 7);
        let state = GameState::new(&index);
        assert_eq!(state.current_player(), Player::X);
        assert!(!state.is_terminal());
        assert_eq!(state.legal_actions().len(), 7);
        assert_eq!(state.last_move(), None);
    }

    #[test]
    fn test_play() {
        let index = CombinationIndex::build(6, 7);
        let mut state = GameState::new(&index);
        assert_eq!(state.play(3), Ok(Outcome::Continue));

        assert_eq!(state.current_player(), Player::O);
        assert_eq!(state.board().get(5, 3), Cell::X);
        assert_eq!(state.last_move(), Some(Position::new(5, 3)));
        assert_eq!(state.piece_count(), 1);
    }

    #[test]
    fn test_failed_move_keeps_turn() {
        let index = CombinationIndex::build(4, 4);
        let mut state = GameState::new(&index);
        for _ in 0..4 {
            state.play(0).unwrap();
        }
        let player = state.current_player();
        assert_eq!(state.play(0), Err(MoveError::ColumnFull { column: 0 }));
        assert!(state.play(4).is_err());
        assert_eq!(state.current_player(), player);
        assert_eq!(state.piece_count(), 4);
    }

    #[test]
    fn test_win_detection() {
        let index = CombinationIndex::build(6, 7);
        let mut state = GameState::new(&index);

        // X builds a horizontal line, O stacks on top of it
        for col in 0..4 {
            let outcome = state.play(col).unwrap();
            if col < 3 {
                assert_eq!(outcome, Outcome::Continue);
                state.play(col).unwrap();
            } else {
                assert_eq!(outcome, Outcome::Win(Player::X));
            }
        }

        assert!(state.is_terminal());
        assert_eq!(state.outcome(), Some(Outcome::Win(Player::X)));
        assert_eq!(state.play(5), Err(MoveError::GameOver));
        assert!(state.legal_actions().is_empty());
    }

    #[test]
    fn test_diagonal_win() {
        let index = CombinationIndex::build(6, 7);
        let mut board = Board::standard();
        // Create diagonal / pattern
        board.place_piece(Player::X, 0).unwrap();
        board.place_piece(Player::O, 1).unwrap();
        board.place_piece(Player::X, 1).unwrap();
        board.place_piece(Player::O, 2).unwrap();
        board.place_piece(Player::O, 2).unwrap();
        board.place_piece(Player::X, 2).unwrap();
        board.place_piece(Player::O, 3).unwrap();
        board.place_piece(Player::O, 3).unwrap();
        board.place_piece(Player::O, 3).unwrap();

        // Any member of the diagonal can be the anchor
        let last = board.place_piece(Player::X, 3).unwrap();
        let count = board.piece_count();
        assert_eq!(
            check_terminal(&board, Player::X, count, &index, last),
            Outcome::Win(Player::X)
        );
        assert_eq!(
            check_terminal(&board, Player::X, count, &index, Position::new(4, 1)),
            Outcome::Win(Player::X)
        );
        assert_eq!(
            check_terminal(&board, Player::O, count, &index, last),
            Outcome::Continue
        );
    }

    #[test]
    fn test_anti_diagonal_win() {
        let index = CombinationIndex::build(6, 7);
        let mut board = Board::standard();
        // Create diagonal \ pattern
        board.place_piece(Player::X, 6).unwrap();
        board.place_piece(Player::O, 5).unwrap();
        board.place_piece(Player::X, 5).unwrap();
        board.place_piece(Player::O, 4).unwrap();
        board.place_piece(Player::O, 4).unwrap();
        board.place_piece(Player::X, 4).unwrap();
        board.place_piece(Player::O, 3).unwrap();
        board.place_piece(Player::O, 3).unwrap();
        board.place_piece(Player::O, 3).unwrap();
        let last = board.place_piece(Player::X, 3).unwrap();

        assert_eq!(
            check_terminal(&board, Player::X, board.piece_count(), &index, last),
            Outcome::Win(Player::X)
        );
    }

    #[test]
    fn test_no_win_with_three() {
        let index = CombinationIndex::build(6, 7);
        let mut board = Board::standard();
        for col in 0..3 {
            board.place_piece(Player::X, col).unwrap();
        }
        assert_eq!(
            check_terminal(&board, Player::X, 3, &index, Position::new(5, 2)),
            Outcome::Continue
        );
    }

    #[test]
    fn test_win_beats_draw_on_last_cell() {
        // 4x4 board whose final piece completes the top row.
        let index = CombinationIndex::build(4, 4);
        let mut board = Board::new(4, 4);
        let fill = [
            [Player::X, Player::O, Player::X, Player::O],
            [Player::O, Player::X, Player::O, Player::X],
            [Player::O, Player::X, Player::O, Player::X],
        ];
        for row in fill.iter() {
            for (col, &player) in row.iter().enumerate() {
                board.place_piece(player, col).unwrap();
            }
        }
        for col in 0..3 {
            board.place_piece(Player::X, col).unwrap();
        }
        let last = board.place_piece(Player::X, 3).unwrap();
        assert!(board.is_full());
        assert_eq!(
            check_terminal(&board, Player::X, 16, &index, last),
            Outcome::Win(Player::X)
        );
    }

    #[test]
    fn test_draw_when_full_without_line() {
        let index = CombinationIndex::build(4, 4);
        let mut board = Board::new(4, 4);
        // Two-column stripes alternating by row pair: no four in any direction.
        let fill = [
            [Player::X, Player::X, Player::O, Player::O],
            [Player::O, Player::O, Player::X, Player::X],
            [Player::X, Player::X, Player::O, Player::O],
            [Player::O, Player::O, Player::X, Player::X],
        ];
        let mut last = Position::new(0, 0);
        for row in fill.iter() {
            for (col, &player) in row.iter().enumerate() {
                last = board.place_piece(player, col).unwrap();
            }
        }
        assert_eq!(
            check_terminal(&board, Player::X, 16, &index, last),
            Outcome::Draw
        );
    }

    #[test]
    fn test_mismatched_index_never_matches_outside_board() {
        let big = CombinationIndex::build(8, 8);
        let mut board = Board::new(4, 4);
        for col in 0..4 {
            board.place_piece(Player::X, col).unwrap();
        }
        // (3, 3) on the 8x8 index has runs reaching past column 3.
        let outcome = check_terminal(&board, Player::X, 4, &big, Position::new(3, 3));
        assert_eq!(outcome, Outcome::Win(Player::X));
        let outcome = check_terminal(&board, Player::X, 4, &big, Position::new(7, 7));
        assert_eq!(outcome, Outcome::Continue);
    }
}
