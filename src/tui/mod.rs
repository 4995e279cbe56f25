//! Terminal front end: drives a [`GameSession`] from the channel and the keyboard.

mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tracing::{debug, error, info, instrument};

use crate::channel::Channel;
use crate::config::ClientConfig;
use crate::games::noughts::{MoveRejected, Position};
use crate::presentation::BoardView;
use crate::session::GameSession;
use input::KeyAction;

/// Runs the terminal client until the user quits.
pub async fn run_tui(config: &ClientConfig) -> Result<()> {
    info!(url = %config.url(), player_id = %config.player_id(), "Starting terminal client");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game(&mut terminal, config).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }

    res
}

/// Event loop: channel events and key presses feed the session, then redraw.
#[instrument(skip_all, fields(url = %config.url()))]
async fn run_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &ClientConfig,
) -> Result<()> {
    let mut channel = Channel::open(config.url());
    let mut session = GameSession::new(config.player_id().clone(), channel.sender());
    let mut keys = EventStream::new();
    let mut cursor = Position::Center;
    let mut channel_done = false;
    // Why the last click or reset was refused.
    let mut notice: Option<String> = None;

    loop {
        let view = BoardView::render(&session.snapshot());
        terminal.draw(|frame| ui::draw(frame, &view, cursor, notice.as_deref()))?;

        tokio::select! {
            event = channel.next(), if !channel_done => match event {
                Some(event) => session.handle(event),
                None => {
                    debug!("Channel event stream ended");
                    channel_done = true;
                }
            },
            key = keys.next() => match key {
                Some(Ok(Event::Key(key))) => match input::action(key, cursor) {
                    KeyAction::Cursor(position) => cursor = position,
                    KeyAction::Click(position) => {
                        cursor = position;
                        notice = match view.click(position.to_index()) {
                            Some(intent) => refusal(session.apply(intent)),
                            None => {
                                debug!(position = %position, "Cell disabled");
                                Some(format!("{} is not playable", position))
                            }
                        };
                    }
                    KeyAction::Reset => notice = refusal(session.apply(view.reset())),
                    KeyAction::Quit => {
                        info!("User quit");
                        return Ok(());
                    }
                    KeyAction::Ignore => {}
                },
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(()),
            },
        }
    }
}

fn refusal(result: Result<(), MoveRejected>) -> Option<String> {
    result
        .inspect_err(|e| debug!(error = %e, "Intent refused"))
        .err()
        .map(|e| e.to_string())
}
