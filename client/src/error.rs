use thiserror::Error;

use roomlink_protocol::SignalKind;

/// Failure of the transport carrying an outbound signal to the gateway.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("relay transport failure: {0}")]
    Relay(String),
}

/// Failure while driving the local peer-connection object.
///
/// Never crashes the process: the state machine logs it, moves to
/// `Failed` and returns it so the caller can surface a status message.
#[derive(Debug, Error)]
pub enum NegotiationError {
    #[error("failed to create the peer connection: {0}")]
    Connect(String),
    #[error("peer connection rejected a {kind} payload: {reason}")]
    Rejected {
        kind: SignalKind,
        reason: String,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
}
