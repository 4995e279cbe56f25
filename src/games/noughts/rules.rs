//! Win detection and move legality.

use super::types::{Board, Cell, Mark};
use derive_more::{Display, Error};
use tracing::instrument;

/// Winning index triples: rows, columns, then diagonals.
///
/// The order is significant: when more than one line is complete,
/// the first one listed here decides the winner.
pub const WINNING_COMBINATIONS: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the first completed line, if any.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<[usize; 3]> {
    WINNING_COMBINATIONS.into_iter().find(|&[a, b, c]| {
        let cell = board.get(a);
        cell.is_some_and(|cell| cell != Cell::Empty) && cell == board.get(b) && cell == board.get(c)
    })
}

/// Returns the winning mark, or `None` when no line is complete.
#[instrument(skip(board))]
pub fn winner(board: &Board) -> Option<Mark> {
    winning_line(board)
        .and_then(|[a, _, _]| board.get(a))
        .and_then(Cell::mark)
}

/// Why a move intent was refused. The session is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveRejected {
    /// The channel is not connected.
    #[display("not connected")]
    Disconnected,
    /// Fewer than two players are seated.
    #[display("waiting for another player ({players} connected)")]
    NotEnoughPlayers {
        /// Players currently seated.
        players: usize,
    },
    /// Index outside 0-8.
    #[display("cell {index} is out of bounds")]
    OutOfBounds {
        /// Rejected index.
        index: usize,
    },
    /// The target cell already holds a mark.
    #[display("cell {index} is already taken")]
    CellOccupied {
        /// Rejected index.
        index: usize,
    },
    /// A line is already complete.
    #[display("game already won by {winner}")]
    GameOver {
        /// Mark that completed a line.
        winner: Mark,
    },
    /// No empty cells remain.
    #[display("board is full")]
    BoardFull,
}

/// Checks the move gate: two players, no winner, board not full, target in bounds and empty.
#[instrument(skip(board))]
pub fn check_move(board: &Board, players: usize, index: usize) -> Result<(), MoveRejected> {
    if players != 2 {
        return Err(MoveRejected::NotEnoughPlayers { players });
    }
    if let Some(winner) = winner(board) {
        return Err(MoveRejected::GameOver { winner });
    }
    if board.is_full() {
        return Err(MoveRejected::BoardFull);
    }
    match board.get(index) {
        None => Err(MoveRejected::OutOfBounds { index }),
        Some(Cell::Occupied(_)) => Err(MoveRejected::CellOccupied { index }),
        Some(Cell::Empty) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(values: [u8; 9]) -> Board {
        let cells = values.map(|v| Cell::try_from(v).expect("valid cell"));
        Board::from_cells(cells)
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        assert_eq!(winner(&board([1, 1, 1, 2, 2, 0, 0, 0, 0])), Some(Mark::PlayerOne));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        assert_eq!(winner(&board([1, 1, 2, 1, 2, 0, 2, 0, 0])), Some(Mark::PlayerTwo));
    }

    #[test]
    fn test_no_winner_incomplete() {
        assert_eq!(winner(&board([1, 1, 0, 2, 2, 0, 0, 0, 0])), None);
    }

    #[test]
    fn test_first_line_breaks_ties() {
        let b = board([2, 2, 2, 0, 0, 0, 1, 1, 1]);
        assert_eq!(winning_line(&b), Some([0, 1, 2]));
        assert_eq!(winner(&b), Some(Mark::PlayerTwo));

        // Row 2 comes before column 2.
        let b = board([2, 2, 1, 0, 0, 1, 1, 1, 1]);
        assert_eq!(winning_line(&b), Some([6, 7, 8]));
        assert_eq!(winner(&b), Some(Mark::PlayerOne));
    }

    #[test]
    fn test_check_move_gate() {
        let empty = Board::new();
        assert_eq!(check_move(&empty, 2, 4), Ok(()));
        assert_eq!(
            check_move(&empty, 1, 4),
            Err(MoveRejected::NotEnoughPlayers { players: 1 })
        );
        assert_eq!(check_move(&empty, 2, 9), Err(MoveRejected::OutOfBounds { index: 9 }));

        let won = board([1, 1, 1, 2, 2, 0, 0, 0, 0]);
        assert_eq!(
            check_move(&won, 2, 5),
            Err(MoveRejected::GameOver { winner: Mark::PlayerOne })
        );

        let full = board([1, 2, 1, 1, 2, 2, 2, 1, 1]);
        assert_eq!(winner(&full), None);
        assert_eq!(check_move(&full, 2, 0), Err(MoveRejected::BoardFull));

        let one = board([1, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(check_move(&one, 2, 0), Err(MoveRejected::CellOccupied { index: 0 }));
    }
}
