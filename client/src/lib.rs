/*!
Client-side core of a two-party call: consumes the events a room broadcast
relay delivers, drops its own echoes, and drives a single peer-connection
object through offer/answer/candidate exchange until a session is
established.

The relay cannot broadcast to "everyone but the sender", so every event
carries the sender's connection id and [`SelfFilter`] discards events that
originated locally before the [`Negotiator`] sees them.

The peer-connection object itself is external; it is reached through the
[`PeerConnection`] trait, and outbound signals leave through a
[`SignalPublisher`].
*/

#![allow(clippy::module_name_repetitions)]
#![warn(
    clippy::pedantic,
    clippy::dbg_macro,
    clippy::unwrap_used,
    clippy::map_err_ignore,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unreachable
)]

mod error;
mod filter;
mod negotiation;
mod peer;

pub use error::{NegotiationError, TransportError};
pub use filter::SelfFilter;
pub use negotiation::{NegotiationState, Negotiator};
pub use peer::{PeerConnection, SignalPublisher};
pub use roomlink_protocol::{ConnectionId, RelayEvent, RoomId, SignalKind, SignalMessage};
