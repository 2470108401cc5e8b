use roomlink_protocol::{ConnectionId, RelayEvent};

/// Drops relayed events that originated locally.
///
/// The relay delivers every broadcast to the whole room, sender included;
/// this predicate is the only thing preventing a client from reacting to
/// its own join or its own negotiation messages, so it runs before any
/// state-machine transition is attempted.
#[derive(Debug, Clone)]
pub struct SelfFilter {
    local: ConnectionId,
}

impl SelfFilter {
    #[must_use]
    pub const fn new(local: ConnectionId) -> Self {
        Self { local }
    }

    /// The local connection identity events are compared against.
    #[must_use]
    pub fn local(&self) -> &ConnectionId {
        &self.local
    }

    /// `true` iff the event was published by someone else.
    #[must_use]
    pub fn accept(&self, event: &RelayEvent) -> bool {
        event.sender() != &self.local
    }
}
