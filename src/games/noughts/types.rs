//! Core domain types for noughts and crosses.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// Mark a player places on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Mark {
    /// First player (crosses, moves first).
    #[display("X")]
    PlayerOne,
    /// Second player (noughts).
    #[display("O")]
    PlayerTwo,
}

impl Mark {
    /// Returns the opponent's mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::PlayerOne => Mark::PlayerTwo,
            Mark::PlayerTwo => Mark::PlayerOne,
        }
    }
}

impl From<Mark> for u8 {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::PlayerOne => 1,
            Mark::PlayerTwo => 2,
        }
    }
}

impl TryFrom<u8> for Mark {
    type Error = InvalidCellValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Mark::PlayerOne),
            2 => Ok(Mark::PlayerTwo),
            _ => Err(InvalidCellValue { value }),
        }
    }
}

/// Wire value that is not a valid cell or mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("invalid cell value {value} (expected 0, 1 or 2)")]
pub struct InvalidCellValue {
    /// The rejected value.
    pub value: u8,
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell holds a player's mark.
    Occupied(Mark),
}

impl Cell {
    /// Glyph shown for this cell.
    pub fn glyph(self) -> &'static str {
        match self {
            Cell::Empty => "-",
            Cell::Occupied(Mark::PlayerOne) => "X",
            Cell::Occupied(Mark::PlayerTwo) => "O",
        }
    }

    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        Cell::Occupied(mark)
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => 0,
            Cell::Occupied(mark) => mark.into(),
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = InvalidCellValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Empty),
            other => Mark::try_from(other).map(Cell::Occupied),
        }
    }
}

/// Index outside the 3x3 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("cell index {index} is out of bounds (must be 0-8)")]
pub struct CellIndexError {
    /// The rejected index.
    pub index: usize,
}

/// 3x3 board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; CELLS],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from explicit cells.
    pub fn from_cells(cells: [Cell; CELLS]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Sets the cell at the given index.
    pub fn set(&mut self, index: usize, cell: Cell) -> Result<(), CellIndexError> {
        let slot = self.cells.get_mut(index).ok_or(CellIndexError { index })?;
        *slot = cell;
        Ok(())
    }

    /// True when no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Cell::Empty)
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let compact: String = self.cells.iter().map(|cell| cell.glyph()).collect();
        write!(f, "{}", compact)
    }
}

/// A connected player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, derive_new::new, Serialize, Deserialize)]
pub struct Client {
    /// Opaque client identity.
    id: String,
    /// Mark this client plays.
    mark: Mark,
}

/// Third client tried to join a full roster.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("roster is full, cannot seat {id}")]
pub struct RosterFull {
    /// Identity of the rejected client.
    pub id: String,
}

/// Connected players, at most one per mark.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Roster {
    clients: Vec<Client>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seats a client in the first free slot (PlayerOne, then PlayerTwo).
    ///
    /// Joining again with a known id returns the mark already assigned.
    #[instrument(skip(self), fields(players = self.clients.len()))]
    pub fn join(&mut self, id: String) -> Result<Mark, RosterFull> {
        if let Some(existing) = self.clients.iter().find(|c| c.id == id) {
            debug!(mark = %existing.mark, "Client already seated");
            return Ok(existing.mark);
        }

        let Some(mark) = self.free_mark() else {
            warn!("Roster already has 2 players");
            return Err(RosterFull { id });
        };

        debug!(mark = %mark, "Seating client");
        self.clients.push(Client::new(id, mark));
        Ok(mark)
    }

    /// Seats a client that gave no id, naming it after its slot.
    ///
    /// The name is `player1` or `player2` for the free mark, with a numeric
    /// suffix when a seated client already uses it.
    #[instrument(skip(self), fields(players = self.clients.len()))]
    pub fn join_anonymous(&mut self) -> Result<(String, Mark), RosterFull> {
        let Some(mark) = self.free_mark() else {
            warn!("Roster already has 2 players");
            return Err(RosterFull {
                id: "anonymous".to_string(),
            });
        };

        let base = format!("player{}", u8::from(mark));
        let mut id = base.clone();
        let mut suffix = 2;
        while self.clients.iter().any(|c| c.id == id) {
            id = format!("{}-{}", base, suffix);
            suffix += 1;
        }

        debug!(mark = %mark, id = %id, "Seating anonymous client");
        self.clients.push(Client::new(id.clone(), mark));
        Ok((id, mark))
    }

    fn free_mark(&self) -> Option<Mark> {
        [Mark::PlayerOne, Mark::PlayerTwo]
            .into_iter()
            .find(|&mark| self.by_mark(mark).is_none())
    }

    /// Number of seated clients (0-2).
    pub fn players(&self) -> usize {
        self.clients.len()
    }

    /// True when both seats are taken.
    pub fn is_complete(&self) -> bool {
        self.clients.len() == 2
    }

    /// Client at the given roster position, in join order.
    pub fn get(&self, position: usize) -> Option<&Client> {
        self.clients.get(position)
    }

    /// Client playing the given mark.
    pub fn by_mark(&self, mark: Mark) -> Option<&Client> {
        self.clients.iter().find(|c| c.mark == mark)
    }

    /// All seated clients in join order.
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }
}
