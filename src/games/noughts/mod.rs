mod position;
mod rules;
mod types;

pub use position::Position;
pub use rules::{MoveRejected, WINNING_COMBINATIONS, check_move, winner, winning_line};
pub use types::{
    Board, CELLS, Cell, CellIndexError, Client, InvalidCellValue, Mark, Roster, RosterFull,
};
