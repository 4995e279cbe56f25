//! Tests for named board positions.

use noughts_and_crosses::{Board, Cell, Mark, Position};

#[test]
fn test_position_to_index() {
    assert_eq!(Position::TopLeft.to_index(), 0);
    assert_eq!(Position::Center.to_index(), 4);
    assert_eq!(Position::BottomRight.to_index(), 8);
}

#[test]
fn test_position_from_index() {
    assert_eq!(Position::from_index(0), Some(Position::TopLeft));
    assert_eq!(Position::from_index(4), Some(Position::Center));
    assert_eq!(Position::from_index(8), Some(Position::BottomRight));
    assert_eq!(Position::from_index(9), None);
}

#[test]
fn test_rows_and_columns() {
    assert_eq!((Position::MiddleRight.row(), Position::MiddleRight.col()), (1, 2));
    assert_eq!(Position::at(2, 0), Some(Position::BottomLeft));
    assert_eq!(Position::at(3, 0), None);
}

#[test]
fn test_position_labels() {
    assert_eq!(Position::TopLeft.to_string(), "Top-left");
    assert_eq!(Position::BottomCenter.label(), "Bottom-center");
}

#[test]
fn test_board_compact_display() {
    let mut board = Board::new();
    board.set(0, Cell::Occupied(Mark::PlayerOne)).unwrap();
    board.set(8, Cell::Occupied(Mark::PlayerTwo)).unwrap();
    assert_eq!(board.to_string(), "X-------O");
}
