//! Board presentation: turns a [`Snapshot`] into cells and status lines.
//!
//! Rendering is pure. The resulting [`BoardView`] also gates user input:
//! clicks on disabled cells produce no [`Intent`].

use crate::games::noughts::{CELLS, Cell, Mark, winning_line};
use crate::session::Snapshot;
use derive_getters::Getters;
use tracing::{debug, instrument};

/// Text shown while the roster is incomplete.
pub const WAITING_MESSAGE: &str = "waiting for another player";

/// Text shown while the channel is closed.
pub const DISCONNECTED_MESSAGE: &str = "disconnected";

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Place the current mark at a cell.
    Move {
        /// Cell index (0-8).
        index: usize,
    },
    /// Start over.
    Reset,
}

/// One rendered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct CellView {
    #[getter(skip)]
    glyph: &'static str,
    /// Whether clicks are ignored.
    disabled: bool,
    /// Part of the winning line.
    highlighted: bool,
}

impl CellView {
    /// Glyph for the cell value.
    pub fn glyph(&self) -> &'static str {
        self.glyph
    }
}

/// Rendered board plus status text.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct BoardView {
    /// Nine cells, row-major.
    cells: [CellView; CELLS],
    /// Set while the roster does not hold exactly two players.
    waiting: Option<String>,
    /// Set once a line is complete.
    congratulations: Option<String>,
    /// Id of the player whose turn it is.
    current: Option<String>,
    /// Set while the channel is closed.
    connection: Option<String>,
}

impl BoardView {
    /// Renders a snapshot.
    #[instrument(skip(snapshot))]
    pub fn render(snapshot: &Snapshot) -> Self {
        let board = snapshot.board();
        let roster = snapshot.roster();
        let line = winning_line(board);
        let winner = snapshot.winner();

        let locked = !roster.is_complete() || board.is_full() || winner.is_some();

        let cells = std::array::from_fn(|index| {
            let cell = board.get(index).unwrap_or_default();
            CellView {
                glyph: cell.glyph(),
                disabled: locked || cell != Cell::Empty,
                highlighted: line.is_some_and(|line| line.contains(&index)),
            }
        });

        let waiting = (!roster.is_complete()).then(|| WAITING_MESSAGE.to_string());

        let congratulations = winner.map(|mark| format!("Congratulations: {}", winner_name(snapshot, mark)));

        let current = snapshot.current().map(|client| client.id().clone());

        let connection = (!snapshot.connected()).then(|| DISCONNECTED_MESSAGE.to_string());

        debug!(locked, ?winner, players = roster.players(), "Rendered board");

        Self {
            cells,
            waiting,
            congratulations,
            current,
            connection,
        }
    }

    /// Click on cell `index`. Disabled or unknown cells yield nothing.
    pub fn click(&self, index: usize) -> Option<Intent> {
        let cell = self.cells.get(index)?;
        (!cell.disabled).then_some(Intent::Move { index })
    }

    /// Reset control. Always available.
    pub fn reset(&self) -> Intent {
        Intent::Reset
    }

    /// True when every cell is disabled.
    pub fn all_disabled(&self) -> bool {
        self.cells.iter().all(|cell| cell.disabled)
    }
}

/// Id of the winning player.
///
/// Picks the first roster entry when it holds the winning mark, the second
/// otherwise. Falls back to the mark glyph when that entry is missing.
fn winner_name(snapshot: &Snapshot, mark: Mark) -> String {
    let roster = snapshot.roster();
    let position = roster
        .get(0)
        .map(|first| usize::from(*first.mark() != mark))
        .unwrap_or(0);

    roster
        .get(position)
        .map(|client| client.id().clone())
        .unwrap_or_else(|| mark.to_string())
}
