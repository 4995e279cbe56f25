//! Game session state for one client.
//!
//! The session folds [`ChannelEvent`]s and local intents into board, roster
//! and turn changes. Local moves are applied optimistically: the board and
//! turn change as soon as the move is sent, without waiting for the peer.
//! Resets are the opposite: the board only changes when a `reset` message
//! comes back over the channel.

use crate::channel::{ChannelEvent, Outbox};
use crate::games::noughts::{Board, Cell, Client, Mark, MoveRejected, Roster, check_move, winner};
use crate::presentation::Intent;
use crate::protocol::Message;
use derive_getters::Getters;
use futures::{Stream, StreamExt};
use tracing::{debug, info, instrument, warn};

/// State of the underlying channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum ConnectionState {
    /// Channel closed, or never opened.
    #[default]
    Disconnected,
    /// Channel opening.
    Connecting,
    /// Channel open.
    Connected,
}

/// Coarse session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Channel closed. Terminal.
    Disconnected,
    /// Waiting for the channel to open.
    Connecting,
    /// Channel open with this many players seated (0-2).
    Connected {
        /// Seated players.
        players: usize,
    },
}

/// Read-only view of a session, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_new::new)]
pub struct Snapshot {
    /// Whether the channel is open.
    connected: bool,
    /// Current board.
    board: Board,
    /// Seated players.
    roster: Roster,
    /// Mark whose turn it is.
    turn: Mark,
}

impl Snapshot {
    /// Player whose turn it is, if seated.
    pub fn current(&self) -> Option<&Client> {
        self.roster.by_mark(self.turn)
    }

    /// Winning mark, recomputed from the board.
    pub fn winner(&self) -> Option<Mark> {
        winner(&self.board)
    }
}

/// One client's view of the game.
#[derive(Debug)]
pub struct GameSession<O> {
    id: String,
    outbox: O,
    connection: ConnectionState,
    board: Board,
    roster: Roster,
    turn: Mark,
}

impl<O: Outbox> GameSession<O> {
    /// Creates a session for client `id` waiting on its channel to open.
    #[instrument(skip(outbox))]
    pub fn new(id: String, outbox: O) -> Self {
        info!("Creating game session");
        Self {
            id,
            outbox,
            connection: ConnectionState::Connecting,
            board: Board::new(),
            roster: Roster::new(),
            turn: Mark::PlayerOne,
        }
    }

    /// This client's id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Seated players.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Mark whose turn it is.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Player whose turn it is, if seated.
    pub fn current(&self) -> Option<&Client> {
        self.roster.by_mark(self.turn)
    }

    /// Channel state.
    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    /// True while the channel is open.
    pub fn is_connected(&self) -> bool {
        self.connection == ConnectionState::Connected
    }

    /// Winning mark, recomputed from the board.
    pub fn winner(&self) -> Option<Mark> {
        winner(&self.board)
    }

    /// Coarse phase of the session.
    pub fn phase(&self) -> Phase {
        match self.connection {
            ConnectionState::Disconnected => Phase::Disconnected,
            ConnectionState::Connecting => Phase::Connecting,
            ConnectionState::Connected => Phase::Connected {
                players: self.roster.players(),
            },
        }
    }

    /// Copies the state the presentation layer needs.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.is_connected(),
            self.board.clone(),
            self.roster.clone(),
            self.turn,
        )
    }

    /// Applies one channel event.
    #[instrument(skip(self), fields(client_id = %self.id, connection = %self.connection))]
    pub fn handle(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::Opened => {
                info!("Channel open, announcing presence");
                self.connection = ConnectionState::Connected;
                self.outbox.send(&Message::Connect {
                    id: Some(self.id.clone()),
                });
            }
            ChannelEvent::Message(message) => self.receive(message),
            ChannelEvent::Unknown { kind } => {
                debug!(kind = %kind, "Ignoring unrecognized message type");
            }
            ChannelEvent::Closed => {
                info!("Channel closed, session disconnected");
                self.connection = ConnectionState::Disconnected;
            }
        }
    }

    fn receive(&mut self, message: Message) {
        match message {
            Message::Connect { id } => {
                let joined = match id {
                    Some(id) => self.roster.join(id),
                    None => self.roster.join_anonymous().map(|(_, mark)| mark),
                };
                match joined {
                    Ok(mark) => info!(mark = %mark, players = self.roster.players(), "Roster updated"),
                    Err(e) => warn!(error = %e, "Ignoring connect"),
                }
            }
            Message::Move { index, mark } => {
                debug!(index, mark = %mark, "Observed move from peer");
            }
            Message::Reset { board } => {
                info!(board = %board, "Applying reset");
                self.board = board;
                self.turn = Mark::PlayerOne;
            }
        }
    }

    /// Local click on cell `index`.
    ///
    /// On success the move is sent, the cell is marked and the turn passes
    /// to the other player. A rejected click changes nothing.
    #[instrument(skip(self), fields(client_id = %self.id, turn = %self.turn))]
    pub fn click(&mut self, index: usize) -> Result<Mark, MoveRejected> {
        if !self.is_connected() {
            debug!("Click while disconnected");
            return Err(MoveRejected::Disconnected);
        }
        check_move(&self.board, self.roster.players(), index).inspect_err(|e| {
            debug!(error = %e, "Click rejected");
        })?;

        let mark = self.turn;
        self.outbox.send(&Message::Move { index, mark });
        self.board
            .set(index, Cell::Occupied(mark))
            .map_err(|_| MoveRejected::OutOfBounds { index })?;
        self.turn = mark.opponent();

        info!(index, mark = %mark, board = %self.board, "Move applied");
        Ok(mark)
    }

    /// Local reset request. The board is cleared when the echo arrives.
    #[instrument(skip(self), fields(client_id = %self.id))]
    pub fn reset(&mut self) {
        if !self.is_connected() {
            debug!("Reset while disconnected, not sent");
            return;
        }
        info!("Requesting reset");
        self.outbox.send(&Message::Reset {
            board: Board::new(),
        });
    }

    /// Routes a presentation intent, reporting why a move was refused.
    pub fn apply(&mut self, intent: Intent) -> Result<(), MoveRejected> {
        match intent {
            Intent::Move { index } => self.click(index).map(|_| ()),
            Intent::Reset => {
                self.reset();
                Ok(())
            }
        }
    }

    /// Folds events until the stream ends or the channel closes.
    #[instrument(skip_all, fields(client_id = %self.id))]
    pub async fn run<S>(&mut self, mut events: S)
    where
        S: Stream<Item = ChannelEvent> + Unpin,
    {
        while let Some(event) = events.next().await {
            let closed = event == ChannelEvent::Closed;
            self.handle(event);
            if closed {
                break;
            }
        }
        self.connection = ConnectionState::Disconnected;
    }
}
