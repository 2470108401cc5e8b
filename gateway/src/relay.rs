use async_trait::async_trait;
use thiserror::Error;

use roomlink_protocol::{ConnectionId, RelayEvent, RoomId};

/// Failure of a call against the relay service.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The connection id is not known to the relay.
    #[error("unknown connection: {0}")]
    UnknownConnection(ConnectionId),
    /// The relay transport itself failed.
    #[error("relay transport failure: {0}")]
    Transport(String),
}

/// The room directory owned by the relay service, reduced to the two calls
/// the gateway issues against it.
///
/// Rooms come into existence on first join and vanish when their last
/// member is gone; the gateway never tracks room existence itself.
#[async_trait]
pub trait RoomRelay: Send + Sync {
    /// Add `connection` to the group named by `room`. Idempotent.
    async fn join_group(&self, room: &RoomId, connection: &ConnectionId)
        -> Result<(), RelayError>;

    /// Deliver `event` to every current member of `room`, the sender
    /// included. There is no exclude-sender variant.
    async fn broadcast_to_group(&self, room: &RoomId, event: RelayEvent)
        -> Result<(), RelayError>;
}
