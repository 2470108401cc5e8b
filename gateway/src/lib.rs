/*!
Signaling gateway for two-party calls.

Exposes two stateless HTTP operations, `POST /joinRoom` and
`POST /sendSignal`, that validate their input and forward to a room-scoped
broadcast relay. The relay can only broadcast to a whole room or address a
single member, never "everyone but the sender", so every broadcast embeds
the sender's connection id and receivers filter out their own events.
*/

pub mod env;
pub mod error;
pub mod memory;
pub mod relay;
pub mod router;

pub use error::GatewayError;
pub use memory::InMemoryRelay;
pub use relay::{RelayError, RoomRelay};
pub use router::create_router;
