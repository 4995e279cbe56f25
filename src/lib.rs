//! noughts_and_crosses - two-player tic-tac-toe synchronized over a WebSocket
//!
//! Each client keeps its own copy of the game and exchanges `connect`,
//! `move` and `reset` messages with an external peer.
//!
//! # Architecture
//!
//! - **Rules**: board types and the win evaluator
//! - **Channel**: duplex WebSocket connection yielding typed events
//! - **Session**: the per-client state machine fed by channel events and clicks
//! - **Presentation**: pure view model deciding what is shown and clickable
//! - **TUI**: terminal front end wiring the above together
//!
//! # Example
//!
//! ```no_run
//! use noughts_and_crosses::{BoardView, Channel, GameSession};
//! use futures::StreamExt;
//!
//! # async fn example() {
//! let mut channel = Channel::open("ws://localhost:8080/games/play");
//! let mut session = GameSession::new("alice".to_string(), channel.sender());
//!
//! while let Some(event) = channel.next().await {
//!     session.handle(event);
//!     let view = BoardView::render(&session.snapshot());
//!     if let Some(intent) = view.click(4) {
//!         if let Err(rejected) = session.apply(intent) {
//!             eprintln!("move refused: {}", rejected);
//!         }
//!     }
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod channel;
mod config;
mod error;
mod games;
mod presentation;
mod protocol;
mod session;
mod tui;

// Crate-level exports - Game types
pub use games::noughts::{
    Board, CELLS, Cell, CellIndexError, Client, InvalidCellValue, Mark, MoveRejected, Position,
    Roster, RosterFull, WINNING_COMBINATIONS, check_move, winner, winning_line,
};

// Crate-level exports - Wire protocol
pub use protocol::{Decoded, Message, decode, encode};

// Crate-level exports - Connection channel
pub use channel::{Channel, ChannelEvent, ChannelSender, Outbox};

// Crate-level exports - Session state
pub use session::{ConnectionState, GameSession, Phase, Snapshot};

// Crate-level exports - Presentation
pub use presentation::{BoardView, CellView, DISCONNECTED_MESSAGE, Intent, WAITING_MESSAGE};

// Crate-level exports - Configuration and errors
pub use config::{ClientConfig, PLAYER_ID_ENV, URL_ENV};
pub use error::{ConfigError, ProtocolError};

// Crate-level exports - Terminal front end
pub use tui::run_tui;
