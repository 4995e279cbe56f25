//! Tests for board presentation gating and status text.

use noughts_and_crosses::{
    Board, BoardView, Cell, DISCONNECTED_MESSAGE, Intent, Mark, Roster, Snapshot, WAITING_MESSAGE,
};

fn board(values: [u8; 9]) -> Board {
    Board::from_cells(values.map(|v| Cell::try_from(v).expect("valid cell")))
}

fn roster(ids: &[&str]) -> Roster {
    let mut roster = Roster::new();
    for id in ids {
        roster.join(id.to_string()).expect("seat available");
    }
    roster
}

fn render(values: [u8; 9], ids: &[&str]) -> BoardView {
    BoardView::render(&Snapshot::new(true, board(values), roster(ids), Mark::PlayerOne))
}

const OPEN: [u8; 9] = [1, 2, 0, 0, 0, 0, 0, 0, 0];
const FULL_DRAW: [u8; 9] = [1, 2, 1, 1, 2, 2, 2, 1, 1];
const WON: [u8; 9] = [1, 1, 1, 2, 2, 0, 0, 0, 0];

#[test]
fn test_open_game_enables_only_empty_cells() {
    let view = render(OPEN, &["a", "b"]);

    for (index, cell) in view.cells().iter().enumerate() {
        assert_eq!(*cell.disabled(), index < 2, "cell {}", index);
    }
    assert_eq!(view.click(0), None);
    assert_eq!(view.click(5), Some(Intent::Move { index: 5 }));
    assert_eq!(view.waiting(), &None);
    assert_eq!(view.congratulations(), &None);
}

#[test]
fn test_incomplete_roster_disables_everything() {
    for ids in [&[][..], &["a"][..]] {
        let view = render(OPEN, ids);
        assert!(view.all_disabled());
        assert_eq!(view.waiting().as_deref(), Some(WAITING_MESSAGE));
    }
}

#[test]
fn test_full_board_disables_everything() {
    let view = render(FULL_DRAW, &["a", "b"]);
    assert!(view.all_disabled());
    assert_eq!(view.congratulations(), &None);
    assert_eq!(view.waiting(), &None);
}

#[test]
fn test_winner_disables_everything() {
    let view = render(WON, &["a", "b"]);
    assert!(view.all_disabled());
    assert_eq!(view.click(5), None);
}

#[test]
fn test_gates_combine() {
    assert!(render(WON, &["a"]).all_disabled());
    assert!(render(FULL_DRAW, &["a"]).all_disabled());
    let full_win = [1, 1, 1, 2, 2, 1, 2, 1, 2];
    assert!(render(full_win, &["a", "b"]).all_disabled());
    assert!(render(full_win, &[]).all_disabled());
}

#[test]
fn test_glyphs() {
    let view = render(OPEN, &["a", "b"]);
    let glyphs: Vec<&str> = view.cells().iter().map(|cell| cell.glyph()).collect();
    assert_eq!(glyphs, ["X", "O", "-", "-", "-", "-", "-", "-", "-"]);
}

#[test]
fn test_congratulations_names_winner() {
    let view = render(WON, &["a", "b"]);
    assert_eq!(view.congratulations().as_deref(), Some("Congratulations: a"));

    let o_wins = [2, 2, 2, 1, 1, 0, 1, 0, 0];
    let view = render(o_wins, &["a", "b"]);
    assert_eq!(view.congratulations().as_deref(), Some("Congratulations: b"));
}

#[test]
fn test_winning_line_highlighted() {
    let view = render(WON, &["a", "b"]);
    let highlighted: Vec<usize> = view
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, cell)| *cell.highlighted())
        .map(|(index, _)| index)
        .collect();
    assert_eq!(highlighted, [0, 1, 2]);
}

#[test]
fn test_reset_always_available() {
    for view in [render(OPEN, &[]), render(WON, &["a", "b"]), render(FULL_DRAW, &["a", "b"])] {
        assert_eq!(view.reset(), Intent::Reset);
    }
}

#[test]
fn test_current_and_connection_status() {
    let view = render(OPEN, &["a", "b"]);
    assert_eq!(view.current().as_deref(), Some("a"));
    assert_eq!(view.connection(), &None);

    let snapshot = Snapshot::new(false, Board::new(), roster(&["a", "b"]), Mark::PlayerTwo);
    let view = BoardView::render(&snapshot);
    assert_eq!(view.current().as_deref(), Some("b"));
    assert_eq!(view.connection().as_deref(), Some(DISCONNECTED_MESSAGE));
}
