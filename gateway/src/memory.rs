use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use roomlink_protocol::{ConnectionId, RelayEvent, RoomId};

use crate::relay::{RelayError, RoomRelay};

pub type Connections = Arc<RwLock<HashMap<ConnectionId, mpsc::UnboundedSender<RelayEvent>>>>;
pub type Rooms = Arc<RwLock<HashMap<RoomId, HashSet<ConnectionId>>>>;

/// In-process implementation of [`RoomRelay`] plus the client-facing side
/// of the relay contract: `connect` assigns a fresh connection id and hands
/// back the event stream for that connection.
///
/// Used for local runs and tests; a deployment against a hosted relay
/// service replaces this with a thin client for that service.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRelay {
    connections: Connections,
    rooms: Rooms,
}

impl InMemoryRelay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Establish a relay connection: assigns a connection id and returns it
    /// together with the receiver on which every event broadcast to a room
    /// this connection has joined will arrive.
    pub async fn connect(&self) -> (ConnectionId, mpsc::UnboundedReceiver<RelayEvent>) {
        let connection_id = ConnectionId::new(Uuid::new_v4().to_string());
        let (tx, rx) = mpsc::unbounded_channel();
        self.connections
            .write()
            .await
            .insert(connection_id.clone(), tx);
        info!("new connection established: {}", connection_id);
        (connection_id, rx)
    }

    /// Drop a connection and its room memberships. Rooms left empty are
    /// removed.
    pub async fn disconnect(&self, connection: &ConnectionId) {
        self.connections.write().await.remove(connection);

        let mut rooms = self.rooms.write().await;
        rooms.retain(|room, members| {
            members.remove(connection);
            if members.is_empty() {
                debug!("room {} is empty, removing it", room);
                false
            } else {
                true
            }
        });
        info!("connection dropped: {}", connection);
    }

    /// Remove members whose receiving end is gone; called after a broadcast
    /// notices closed channels.
    async fn prune(&self, room: &RoomId, stale: Vec<ConnectionId>) {
        let mut connections = self.connections.write().await;
        for connection in &stale {
            connections.remove(connection);
        }
        drop(connections);

        let mut rooms = self.rooms.write().await;
        let emptied = match rooms.get_mut(room) {
            Some(members) => {
                for connection in &stale {
                    members.remove(connection);
                }
                members.is_empty()
            }
            None => false,
        };
        if emptied {
            debug!("room {} is empty, removing it", room);
            rooms.remove(room);
        }
    }
}

#[async_trait]
impl RoomRelay for InMemoryRelay {
    async fn join_group(
        &self,
        room: &RoomId,
        connection: &ConnectionId,
    ) -> Result<(), RelayError> {
        if !self.connections.read().await.contains_key(connection) {
            return Err(RelayError::UnknownConnection(connection.clone()));
        }

        let mut rooms = self.rooms.write().await;
        let members = rooms.entry(room.clone()).or_default();
        if !members.insert(connection.clone()) {
            debug!("connection {} already in room {}", connection, room);
        }
        Ok(())
    }

    async fn broadcast_to_group(&self, room: &RoomId, event: RelayEvent) -> Result<(), RelayError> {
        let members: Vec<ConnectionId> = match self.rooms.read().await.get(room) {
            Some(members) => members.iter().cloned().collect(),
            None => {
                warn!("broadcast to unknown room {}, nothing delivered", room);
                return Ok(());
            }
        };

        let mut stale = Vec::new();
        {
            let connections = self.connections.read().await;
            for member in members {
                match connections.get(&member) {
                    Some(tx) if tx.send(event.clone()).is_ok() => {}
                    _ => stale.push(member),
                }
            }
        }
        if !stale.is_empty() {
            self.prune(room, stale).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn room(name: &str) -> RoomId {
        RoomId::new(name.to_owned())
    }

    #[tokio::test]
    async fn broadcast_reaches_every_member_including_sender() {
        let relay = InMemoryRelay::new();
        let (first, mut first_rx) = relay.connect().await;
        let (second, mut second_rx) = relay.connect().await;

        relay.join_group(&room("abc123"), &first).await.unwrap();
        relay.join_group(&room("abc123"), &second).await.unwrap();

        let event = RelayEvent::UserJoined {
            connection_id: second.clone(),
        };
        relay
            .broadcast_to_group(&room("abc123"), event.clone())
            .await
            .unwrap();

        assert_eq!(first_rx.try_recv().unwrap(), event);
        assert_eq!(second_rx.try_recv().unwrap(), event);
    }

    #[tokio::test]
    async fn join_is_idempotent() {
        let relay = InMemoryRelay::new();
        let (connection, mut rx) = relay.connect().await;

        relay.join_group(&room("abc123"), &connection).await.unwrap();
        relay.join_group(&room("abc123"), &connection).await.unwrap();

        relay
            .broadcast_to_group(
                &room("abc123"),
                RelayEvent::UserJoined {
                    connection_id: connection.clone(),
                },
            )
            .await
            .unwrap();

        assert!(rx.try_recv().is_ok());
        // a second delivery would mean the member was registered twice
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn join_with_unknown_connection_is_rejected() {
        let relay = InMemoryRelay::new();
        let ghost = ConnectionId::new("never-connected".to_owned());

        let result = relay.join_group(&room("abc123"), &ghost).await;
        assert!(matches!(result, Err(RelayError::UnknownConnection(_))));
    }

    #[tokio::test]
    async fn empty_room_is_removed_on_disconnect() {
        let relay = InMemoryRelay::new();
        let (connection, _rx) = relay.connect().await;
        relay.join_group(&room("abc123"), &connection).await.unwrap();

        relay.disconnect(&connection).await;

        assert!(relay.rooms.read().await.is_empty());
        assert!(relay.connections.read().await.is_empty());
    }
}
