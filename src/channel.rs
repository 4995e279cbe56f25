//! Duplex WebSocket channel to the game peer.
//!
//! [`Channel::open`] spawns one task that owns the socket. Inbound frames
//! are decoded and surfaced as a [`Stream`] of [`ChannelEvent`]s in the order
//! the transport delivers them. Outbound messages go through an
//! [`Outbox`], which never waits and silently drops messages while the
//! socket is not open. Closing sends a WebSocket Close frame and waits
//! briefly for the peer to acknowledge it. No reconnection is attempted.

use crate::protocol::{self, Decoded, Message};
use futures::{SinkExt, Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message as Frame;
use tracing::{debug, info, instrument, warn};

/// How long a closing socket waits for the peer's Close frame.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Event delivered by the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// The socket is open.
    Opened,
    /// A recognized protocol message arrived.
    Message(Message),
    /// A message with an unrecognized type arrived.
    Unknown {
        /// The unrecognized type name.
        kind: String,
    },
    /// The socket closed or failed to open. Always the last event.
    Closed,
}

/// Fire-and-forget transmission of protocol messages.
pub trait Outbox {
    /// Queues a message. Delivery is not guaranteed.
    fn send(&self, message: &Message);
}

impl Outbox for mpsc::UnboundedSender<Message> {
    fn send(&self, message: &Message) {
        if mpsc::UnboundedSender::send(self, message.clone()).is_err() {
            debug!(kind = message.kind(), "Outbox receiver dropped");
        }
    }
}

/// Sending half of a [`Channel`]. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ChannelSender {
    frames: mpsc::UnboundedSender<String>,
    open: Arc<AtomicBool>,
}

impl ChannelSender {
    /// True while the socket is open.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

impl Outbox for ChannelSender {
    #[instrument(skip_all, fields(kind = message.kind()))]
    fn send(&self, message: &Message) {
        if !self.is_open() {
            debug!("Channel not open, dropping message");
            return;
        }

        let text = match protocol::encode(message) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Failed to encode message");
                return;
            }
        };

        debug!(frame = %text, "Queueing frame");
        if self.frames.send(text).is_err() {
            debug!("Channel task gone, dropping message");
        }
    }
}

/// Duplex connection to a WebSocket URL.
///
/// Dropping the channel closes the socket with a Close handshake. The task
/// is aborted only if it can no longer be signalled.
#[derive(Debug)]
pub struct Channel {
    url: String,
    sender: ChannelSender,
    events: mpsc::UnboundedReceiver<ChannelEvent>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl Channel {
    /// Starts connecting to `url`. Progress is reported through the event stream.
    #[instrument(skip_all, fields(url = %url.as_ref()))]
    pub fn open(url: impl AsRef<str>) -> Self {
        let url = url.as_ref().to_string();
        info!("Opening channel");

        let (frame_tx, frame_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let open = Arc::new(AtomicBool::new(false));

        let task = tokio::spawn(pump(
            url.clone(),
            frame_rx,
            event_tx,
            shutdown_rx,
            Arc::clone(&open),
        ));

        Self {
            url,
            sender: ChannelSender {
                frames: frame_tx,
                open,
            },
            events: event_rx,
            shutdown: Some(shutdown_tx),
            task,
        }
    }

    /// URL this channel targets.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// True while the socket is open.
    pub fn is_open(&self) -> bool {
        self.sender.is_open()
    }

    /// Returns a sending handle bound to this connection.
    pub fn sender(&self) -> ChannelSender {
        self.sender.clone()
    }

    /// Closes this connection and opens a new one if the URL changed.
    ///
    /// Senders obtained before the switch stay bound to the old connection.
    #[instrument(skip(self, url), fields(from = %self.url, to = %url.as_ref()))]
    pub fn reopen(&mut self, url: impl AsRef<str>) {
        if self.url == url.as_ref() {
            debug!("URL unchanged, keeping connection");
            return;
        }
        *self = Channel::open(url);
    }

    /// Closes the connection. The Close handshake finishes in the background.
    pub fn close(self) {
        info!(url = %self.url, "Closing channel");
    }
}

impl Drop for Channel {
    fn drop(&mut self) {
        self.sender.open.store(false, Ordering::SeqCst);
        let signalled = self
            .shutdown
            .take()
            .is_some_and(|shutdown| shutdown.send(()).is_ok());
        if !signalled {
            self.task.abort();
        }
        debug!(url = %self.url, signalled, "Channel released");
    }
}

impl Outbox for Channel {
    fn send(&self, message: &Message) {
        self.sender.send(message);
    }
}

impl Stream for Channel {
    type Item = ChannelEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.events.poll_recv(cx)
    }
}

/// Socket task: connect, then shuttle frames until either side closes.
#[instrument(skip_all, fields(url = %url))]
async fn pump(
    url: String,
    mut frames: mpsc::UnboundedReceiver<String>,
    events: mpsc::UnboundedSender<ChannelEvent>,
    mut shutdown: oneshot::Receiver<()>,
    open: Arc<AtomicBool>,
) {
    let stream = tokio::select! {
        connected = tokio_tungstenite::connect_async(url.as_str()) => match connected {
            Ok((stream, response)) => {
                info!(status = %response.status(), "Channel connected");
                stream
            }
            Err(e) => {
                warn!(error = %e, "Failed to open channel");
                let _ = events.send(ChannelEvent::Closed);
                return;
            }
        },
        _ = &mut shutdown => {
            debug!("Closed before the socket opened");
            let _ = events.send(ChannelEvent::Closed);
            return;
        }
    };

    open.store(true, Ordering::SeqCst);
    let _ = events.send(ChannelEvent::Opened);

    let (mut sink, mut source) = stream.split();

    loop {
        tokio::select! {
            outbound = frames.recv() => match outbound {
                Some(text) => {
                    if let Err(e) = sink.send(Frame::text(text)).await {
                        warn!(error = %e, "Failed to send frame");
                        break;
                    }
                }
                None => {
                    debug!("All senders dropped, closing socket");
                    let _ = sink.send(Frame::Close(None)).await;
                    break;
                }
            },
            inbound = source.next() => match inbound {
                Some(Ok(Frame::Text(text))) => forward(&events, text.as_str()),
                Some(Ok(Frame::Close(frame))) => {
                    debug!(?frame, "Peer closed channel");
                    break;
                }
                Some(Ok(_)) => debug!("Ignoring non-text frame"),
                Some(Err(e)) => {
                    warn!(error = %e, "Channel read failed");
                    break;
                }
                None => break,
            },
            _ = &mut shutdown => {
                debug!("Close requested");
                open.store(false, Ordering::SeqCst);
                if let Err(e) = sink.send(Frame::Close(None)).await {
                    debug!(error = %e, "Failed to send close frame");
                    break;
                }
                let acknowledged = tokio::time::timeout(CLOSE_TIMEOUT, async {
                    while let Some(Ok(frame)) = source.next().await {
                        if frame.is_close() {
                            return true;
                        }
                    }
                    false
                })
                .await
                .unwrap_or(false);
                debug!(acknowledged, "Close handshake finished");
                break;
            }
        }
    }

    open.store(false, Ordering::SeqCst);
    info!("Channel closed");
    let _ = events.send(ChannelEvent::Closed);
}

/// Decodes one text frame and forwards it. Malformed frames are dropped.
fn forward(events: &mpsc::UnboundedSender<ChannelEvent>, text: &str) {
    let event = match protocol::decode(text) {
        Ok(Decoded::Message(message)) => ChannelEvent::Message(message),
        Ok(Decoded::Unknown { kind }) => ChannelEvent::Unknown { kind },
        Err(e) => {
            debug!(error = %e, frame = %text, "Dropping malformed frame");
            return;
        }
    };
    let _ = events.send(event);
}
