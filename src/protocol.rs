//! Wire protocol: JSON text frames of the form `{"type": ..., "payload": ...}`.

use crate::error::ProtocolError;
use crate::games::noughts::{Board, CELLS, Mark};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A protocol message exchanged with the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Announces presence. The id is optional on the wire.
    Connect {
        /// Identity of the announcing client.
        id: Option<String>,
    },
    /// Announces a mark placed at a cell.
    Move {
        /// Cell index (0-8).
        index: usize,
        /// Mark placed.
        mark: Mark,
    },
    /// Announces or echoes a full board reset.
    Reset {
        /// Board to install.
        board: Board,
    },
}

impl Message {
    /// Wire name of this message's type.
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Connect { .. } => "connect",
            Message::Move { .. } => "move",
            Message::Reset { .. } => "reset",
        }
    }
}

/// Result of decoding an inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// A recognized message.
    Message(Message),
    /// Well-formed envelope with an unrecognized type.
    Unknown {
        /// The unrecognized type name.
        kind: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payload: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ConnectPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct MovePayload {
    index: usize,
    value: Mark,
}

#[derive(Debug, Serialize, Deserialize)]
struct ResetPayload {
    board: Board,
}

/// Encodes a message as a JSON text frame.
#[instrument(skip(message), fields(kind = message.kind()))]
pub fn encode(message: &Message) -> Result<String, ProtocolError> {
    let payload = match message {
        Message::Connect { id: None } => None,
        Message::Connect { id: Some(id) } => {
            Some(serde_json::to_value(ConnectPayload {
                id: Some(id.clone()),
            })?)
        }
        Message::Move { index, mark } => Some(serde_json::to_value(MovePayload {
            index: *index,
            value: *mark,
        })?),
        Message::Reset { board } => Some(serde_json::to_value(ResetPayload {
            board: board.clone(),
        })?),
    };

    let envelope = Envelope {
        kind: message.kind().to_string(),
        payload,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Decodes a JSON text frame.
///
/// Unrecognized types decode to [`Decoded::Unknown`]. A `move` or `reset`
/// with a missing or malformed payload is an error; a `connect` never is.
#[instrument(skip(text))]
pub fn decode(text: &str) -> Result<Decoded, ProtocolError> {
    let envelope: Envelope = serde_json::from_str(text)?;
    debug!(kind = %envelope.kind, "Decoding frame");

    let message = match envelope.kind.as_str() {
        "connect" => Message::Connect {
            id: connect_id(envelope.payload),
        },
        "move" => {
            let payload: MovePayload = required(envelope.payload, "move")?;
            if payload.index >= CELLS {
                return Err(ProtocolError::new(format!(
                    "move index {} is out of bounds",
                    payload.index
                )));
            }
            Message::Move {
                index: payload.index,
                mark: payload.value,
            }
        }
        "reset" => {
            let payload: ResetPayload = required(envelope.payload, "reset")?;
            Message::Reset {
                board: payload.board,
            }
        }
        _ => return Ok(Decoded::Unknown { kind: envelope.kind }),
    };

    Ok(Decoded::Message(message))
}

/// Identity carried by a connect payload. Anything unreadable is anonymous.
fn connect_id(payload: Option<serde_json::Value>) -> Option<String> {
    let payload = payload?;
    match serde_json::from_value::<ConnectPayload>(payload) {
        Ok(connect) => connect.id,
        Err(e) => {
            debug!(error = %e, "Unreadable connect payload, treating as anonymous");
            None
        }
    }
}

#[track_caller]
fn required<T: serde::de::DeserializeOwned>(
    payload: Option<serde_json::Value>,
    kind: &str,
) -> Result<T, ProtocolError> {
    let payload =
        payload.ok_or_else(|| ProtocolError::new(format!("{} message without payload", kind)))?;
    Ok(serde_json::from_value(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::noughts::Cell;

    #[test]
    fn test_connect_without_payload() {
        let text = encode(&Message::Connect { id: None }).unwrap();
        assert_eq!(text, r#"{"type":"connect"}"#);
        assert_eq!(
            decode(&text).unwrap(),
            Decoded::Message(Message::Connect { id: None })
        );

        for text in [
            r#"{"type":"connect","payload":null}"#,
            r#"{"type":"connect","payload":{}}"#,
            r#"{"type":"connect","payload":{"name":"a"}}"#,
            r#"{"type":"connect","payload":"x"}"#,
            r#"{"type":"connect","payload":[1,2]}"#,
            r#"{"type":"connect","payload":{"id":5}}"#,
        ] {
            assert_eq!(
                decode(text).unwrap(),
                Decoded::Message(Message::Connect { id: None }),
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_connect_with_id() {
        let message = Message::Connect {
            id: Some("alice".to_string()),
        };
        let text = encode(&message).unwrap();
        assert_eq!(text, r#"{"type":"connect","payload":{"id":"alice"}}"#);
        assert_eq!(
            decode(r#"{"type":"connect","payload":{"id":"alice","extra":true}}"#).unwrap(),
            Decoded::Message(message)
        );
    }

    #[test]
    fn test_move_wire_shape() {
        let text = encode(&Message::Move {
            index: 4,
            mark: Mark::PlayerTwo,
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"type": "move", "payload": {"index": 4, "value": 2}})
        );
    }

    #[test]
    fn test_reset_board_is_integer_array() {
        let mut board = Board::new();
        board.set(0, Cell::Occupied(Mark::PlayerOne)).unwrap();
        let text = encode(&Message::Reset { board }).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["payload"]["board"], serde_json::json!([1, 0, 0, 0, 0, 0, 0, 0, 0]));
    }

    #[test]
    fn test_unknown_type_is_not_an_error() {
        assert_eq!(
            decode(r#"{"type":"chat","payload":{"text":"hi"}}"#).unwrap(),
            Decoded::Unknown {
                kind: "chat".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_frames_are_errors() {
        assert!(decode("not json").is_err());
        assert!(decode(r#"{"payload":{}}"#).is_err());
        assert!(decode(r#"{"type":"move"}"#).is_err());
        assert!(decode(r#"{"type":"move","payload":{"index":9,"value":1}}"#).is_err());
        assert!(decode(r#"{"type":"move","payload":{"index":0,"value":3}}"#).is_err());
        assert!(decode(r#"{"type":"reset","payload":{"board":[0,0,0]}}"#).is_err());
    }
}
