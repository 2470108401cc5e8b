/*!
Bodies of the HTTP calls accepted by the signaling gateway.

Every field is optional at the serde level: the gateway owns validation and
its exact 400 messages, so deserialization itself must never reject a body
for a missing field.
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /joinRoom`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomRequest {
    /// Room to join
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    /// Relay identity of the joining client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
}

/// Body of `POST /sendSignal`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendSignalRequest {
    /// Room to broadcast into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    /// One of `offer`, `answer`, `ice-candidate`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Opaque negotiation blob
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<Value>,
    /// Identity of the publishing client, embedded into the broadcast
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_connection_id: Option<String>,
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn join_request_tolerates_missing_fields() {
        let request: JoinRoomRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.room_id.is_none());
        assert!(request.connection_id.is_none());
    }

    #[test]
    fn send_signal_request_reads_camel_case_fields() {
        let request: SendSignalRequest = serde_json::from_value(json!({
            "roomId": "abc123",
            "type": "offer",
            "signal": {"sdp": "v=0..."},
            "senderConnectionId": "conn-1"
        }))
        .unwrap();
        assert_eq!(request.room_id.as_deref(), Some("abc123"));
        assert_eq!(request.kind.as_deref(), Some("offer"));
        assert_eq!(request.sender_connection_id.as_deref(), Some("conn-1"));
    }
}
