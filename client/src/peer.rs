use async_trait::async_trait;
use serde_json::Value;

use roomlink_protocol::{RoomId, SignalMessage};

use crate::error::{NegotiationError, TransportError};

/// Seam to the external peer-connection object that performs the actual
/// peer-to-peer negotiation and media exchange.
///
/// Payloads are opaque blobs passed through from the wire; the state
/// machine never inspects them.
#[async_trait]
pub trait PeerConnection: Send {
    /// Produce the local offer and set it as the local description.
    async fn create_offer(&mut self) -> Result<Value, NegotiationError>;

    /// Apply `remote_offer` as the remote description, then produce the
    /// local answer and set it as the local description.
    async fn create_answer(&mut self, remote_offer: Value) -> Result<Value, NegotiationError>;

    /// Apply `remote_answer` as the remote description.
    async fn apply_answer(&mut self, remote_answer: Value) -> Result<(), NegotiationError>;

    /// Feed a discovered candidate hint. Only called once a remote
    /// description has been applied.
    async fn add_ice_candidate(&mut self, candidate: Value) -> Result<(), NegotiationError>;

    /// Release the underlying object. Must take effect synchronously.
    fn close(&mut self);
}

/// Outbound half of the relay contract: publishes a signal message into a
/// room via the gateway.
#[async_trait]
pub trait SignalPublisher: Send {
    async fn publish(
        &mut self,
        room: &RoomId,
        message: SignalMessage,
    ) -> Result<(), TransportError>;
}
