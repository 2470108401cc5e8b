/*!
Helper crate that declares the wire types shared between
[roomlink-gateway](../roomlink_gateway/index.html) and
[roomlink-client](../roomlink_client/index.html).

All bodies and events are JSON with camelCase field names.
*/

#![warn(missing_docs)]

use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod gateway;
pub mod signal;

pub use signal::{RelayEvent, SignalKind, SignalMessage};

/// Opaque identifier of a room, chosen by the first participant and shared
/// out-of-band via a link. The relay service is the only place where a room
/// exists as anything more than this name.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Hash)]
pub struct RoomId(String);

impl RoomId {
    /// Wrap a String into a `RoomId`
    #[must_use]
    pub const fn new(inner: String) -> Self {
        Self(inner)
    }

    /// Return reference to the underlying string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Acquire the underlying type
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for RoomId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl Display for RoomId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque per-session identifier assigned by the relay service when a client
/// connects. Doubles as the relay's addressing unit and as the sender tag
/// embedded in every relayed event, which is what self-filtering compares
/// against.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Wrap a String into a `ConnectionId`
    #[must_use]
    pub const fn new(inner: String) -> Self {
        Self(inner)
    }

    /// Return reference to the underlying string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Acquire the underlying type
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for ConnectionId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl Display for ConnectionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
