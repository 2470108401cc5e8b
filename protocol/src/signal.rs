/*!
Events relayed to every member of a room.

A room broadcast cannot exclude its sender, so each event embeds the
sender's [`ConnectionId`] and receivers drop their own events by comparing
it against their local identity.
*/

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ConnectionId;

/// Kind of a relayed negotiation message.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum SignalKind {
    /// `SDP` offer created by the participant that observed the other join
    Offer,
    /// `SDP` answer created in response to an offer
    Answer,
    /// Discovered network-address hint, may arrive before the answer
    IceCandidate,
}

impl FromStr for SignalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "offer" => Ok(Self::Offer),
            "answer" => Ok(Self::Answer),
            "ice-candidate" => Ok(Self::IceCandidate),
            other => Err(format!("unknown signal type: {other}")),
        }
    }
}

impl Display for SignalKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Offer => write!(f, "offer"),
            Self::Answer => write!(f, "answer"),
            Self::IceCandidate => write!(f, "ice-candidate"),
        }
    }
}

/// Offer, answer or candidate relayed to a room without modification.
///
/// `sender` always carries the identity of the client that published the
/// message; the whole anti-echo mechanism depends on it being present.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SignalMessage {
    /// What kind of negotiation payload this is
    #[serde(rename = "type")]
    pub kind: SignalKind,
    /// Opaque negotiation blob, passed through untouched
    pub signal: Value,
    /// Identity of the publishing client
    #[serde(rename = "connectionId")]
    pub sender: ConnectionId,
}

/// An event delivered to every current member of a room, the sender
/// included.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum RelayEvent {
    /// A participant joined the room. Scoped by the group it was published
    /// to, so it carries no room reference.
    #[serde(rename_all = "camelCase")]
    UserJoined {
        /// Identity of the joining client
        connection_id: ConnectionId,
    },
    /// A negotiation message published by one of the members.
    Signal(SignalMessage),
}

impl RelayEvent {
    /// The identity embedded by the original publisher of this event.
    #[must_use]
    pub fn sender(&self) -> &ConnectionId {
        match self {
            Self::UserJoined { connection_id } => connection_id,
            Self::Signal(message) => &message.sender,
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn signal_kinds_use_wire_spellings() {
        assert_eq!(serde_json::to_value(SignalKind::Offer).unwrap(), json!("offer"));
        assert_eq!(serde_json::to_value(SignalKind::Answer).unwrap(), json!("answer"));
        assert_eq!(
            serde_json::to_value(SignalKind::IceCandidate).unwrap(),
            json!("ice-candidate")
        );
        assert_eq!("ice-candidate".parse::<SignalKind>().unwrap(), SignalKind::IceCandidate);
        assert!("ICE".parse::<SignalKind>().is_err());
    }

    #[test]
    fn user_joined_event_serializes_with_camel_case_fields() {
        let event = RelayEvent::UserJoined {
            connection_id: ConnectionId::new("conn-1".to_owned()),
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"event": "userJoined", "connectionId": "conn-1"})
        );
    }

    #[test]
    fn signal_event_round_trips_with_embedded_sender() {
        let event = RelayEvent::Signal(SignalMessage {
            kind: SignalKind::Answer,
            signal: json!({"sdp": "v=0..."}),
            sender: ConnectionId::new("conn-2".to_owned()),
        });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "event": "signal",
                "type": "answer",
                "signal": {"sdp": "v=0..."},
                "connectionId": "conn-2"
            })
        );
        let parsed: RelayEvent = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.sender().as_str(), "conn-2");
    }
}
