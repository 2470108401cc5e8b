use log::{debug, error, info, warn};
use serde_json::Value;

use roomlink_protocol::{ConnectionId, RelayEvent, RoomId, SignalKind, SignalMessage};

use crate::error::NegotiationError;
use crate::filter::SelfFilter;
use crate::peer::{PeerConnection, SignalPublisher};

/// Where the negotiation currently stands.
///
/// `Offering` and `Answering` are only observable if offer or answer
/// creation suspends; with a synchronous peer connection they collapse
/// into the step that leaves them.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum NegotiationState {
    /// Waiting, nothing observed from a peer yet
    Idle,
    /// A peer joined, the local offer is being produced
    Offering,
    /// Offer published, waiting for the peer's answer
    AwaitingAnswer,
    /// An offer arrived, the local answer is being produced
    Answering,
    /// Both descriptions in place, candidates flow freely
    Connected,
    /// The peer connection reported failure or rejected a payload
    Failed,
    /// Locally hung up, all further events are ignored
    Closed,
}

/// Per-client negotiation state machine.
///
/// Consumes the filtered join/offer/answer/candidate events of one room
/// and drives a single peer-connection object to a connected session with
/// at most one partner. Events must be handed in one at a time and each
/// call runs to completion before the next, so no state is shared across
/// concurrent handlers.
///
/// At most one peer-connection object exists for the lifetime of a room
/// membership; triggers that would create a second one are no-ops.
pub struct Negotiator<C, P>
where
    C: PeerConnection,
    P: SignalPublisher,
{
    room: RoomId,
    filter: SelfFilter,
    connect: Box<dyn FnMut() -> Result<C, NegotiationError> + Send>,
    publisher: P,
    connection: Option<C>,
    state: NegotiationState,
    remote_description_set: bool,
    pending_candidates: Vec<Value>,
}

impl<C, P> Negotiator<C, P>
where
    C: PeerConnection,
    P: SignalPublisher,
{
    /// `connect` is invoked at most once, the first time a negotiation
    /// trigger needs the peer-connection object.
    pub fn new(
        room: RoomId,
        local: ConnectionId,
        connect: impl FnMut() -> Result<C, NegotiationError> + Send + 'static,
        publisher: P,
    ) -> Self {
        Self {
            room,
            filter: SelfFilter::new(local),
            connect: Box::new(connect),
            publisher,
            connection: None,
            state: NegotiationState::Idle,
            remote_description_set: false,
            pending_candidates: Vec::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> NegotiationState {
        self.state
    }

    #[must_use]
    pub fn local(&self) -> &ConnectionId {
        self.filter.local()
    }

    /// Feed one relayed event through the self-filter and the state
    /// machine. On a negotiation failure the state moves to `Failed` and
    /// the error is returned for the caller to surface; it never panics.
    pub async fn handle_event(&mut self, event: RelayEvent) -> Result<(), NegotiationError> {
        if !self.filter.accept(&event) {
            debug!("discarding own event: {:?}", event);
            return Ok(());
        }
        match self.state {
            NegotiationState::Closed => {
                debug!("closed, ignoring event: {:?}", event);
                return Ok(());
            }
            NegotiationState::Failed => {
                debug!("failed, ignoring event: {:?}", event);
                return Ok(());
            }
            _ => {}
        }

        let result = match event {
            RelayEvent::UserJoined { connection_id } => self.on_peer_joined(connection_id).await,
            RelayEvent::Signal(message) => match message.kind {
                SignalKind::Offer => self.on_offer(message.signal).await,
                SignalKind::Answer => self.on_answer(message.signal).await,
                SignalKind::IceCandidate => self.on_candidate(message.signal).await,
            },
        };
        if let Err(err) = &result {
            error!("negotiation failed: {}", err);
            self.state = NegotiationState::Failed;
        }
        result
    }

    /// To be called when the peer-connection object reports a
    /// failed/disconnected transport. No automatic retry.
    pub fn connection_failed(&mut self) {
        if self.state == NegotiationState::Closed {
            return;
        }
        warn!("peer connection reported failure");
        self.state = NegotiationState::Failed;
    }

    /// Local hang-up: closes the peer-connection object synchronously and
    /// drops any buffered candidate, so nothing can be applied to a stale
    /// object afterwards.
    pub fn hang_up(&mut self) {
        if let Some(mut connection) = self.connection.take() {
            connection.close();
        }
        self.pending_candidates.clear();
        self.state = NegotiationState::Closed;
        info!("hung up, negotiation closed");
    }

    /// A second participant appeared: whoever was already in the room
    /// observes the join and initiates. Delivery is at-least-once, so a
    /// duplicate join past `Idle` must not produce a second offer.
    async fn on_peer_joined(&mut self, peer: ConnectionId) -> Result<(), NegotiationError> {
        if self.state != NegotiationState::Idle {
            debug!(
                "peer {} joined while already {:?}, ignoring",
                peer, self.state
            );
            return Ok(());
        }

        info!("peer {} joined room {}, creating offer", peer, self.room);
        self.state = NegotiationState::Offering;
        let offer = self.connection_mut()?.create_offer().await?;
        self.publish(SignalKind::Offer, offer).await?;
        self.state = NegotiationState::AwaitingAnswer;
        Ok(())
    }

    async fn on_offer(&mut self, offer: Value) -> Result<(), NegotiationError> {
        if self.state != NegotiationState::Idle {
            debug!("redundant offer while {:?}, ignoring", self.state);
            return Ok(());
        }

        info!("received an offer in room {}, answering", self.room);
        self.state = NegotiationState::Answering;
        let answer = self.connection_mut()?.create_answer(offer).await?;
        self.remote_description_set = true;
        self.drain_pending_candidates().await?;
        self.publish(SignalKind::Answer, answer).await?;
        self.state = NegotiationState::Connected;
        Ok(())
    }

    async fn on_answer(&mut self, answer: Value) -> Result<(), NegotiationError> {
        if self.state != NegotiationState::AwaitingAnswer {
            debug!("unexpected answer while {:?}, ignoring", self.state);
            return Ok(());
        }

        self.connection_mut()?.apply_answer(answer).await?;
        self.remote_description_set = true;
        self.drain_pending_candidates().await?;
        self.state = NegotiationState::Connected;
        info!("answer applied, session connected in room {}", self.room);
        Ok(())
    }

    /// Candidates routinely race ahead of the answer over a broadcast
    /// relay; until a remote description is in place they are buffered and
    /// applied in arrival order right after it is set.
    async fn on_candidate(&mut self, candidate: Value) -> Result<(), NegotiationError> {
        if self.remote_description_set {
            self.connection_mut()?.add_ice_candidate(candidate).await?;
        } else {
            debug!("candidate arrived before the remote description, buffering");
            self.pending_candidates.push(candidate);
        }
        Ok(())
    }

    async fn drain_pending_candidates(&mut self) -> Result<(), NegotiationError> {
        if self.pending_candidates.is_empty() {
            return Ok(());
        }
        let pending = std::mem::take(&mut self.pending_candidates);
        debug!("applying {} buffered candidate(s)", pending.len());
        for candidate in pending {
            self.connection_mut()?.add_ice_candidate(candidate).await?;
        }
        Ok(())
    }

    fn connection_mut(&mut self) -> Result<&mut C, NegotiationError> {
        if self.connection.is_none() {
            self.connection = Some((self.connect)()?);
            debug!("peer connection created");
        }
        self.connection
            .as_mut()
            .ok_or_else(|| NegotiationError::Connect("peer connection missing".to_owned()))
    }

    async fn publish(&mut self, kind: SignalKind, signal: Value) -> Result<(), NegotiationError> {
        let message = SignalMessage {
            kind,
            signal,
            sender: self.filter.local().clone(),
        };
        self.publisher
            .publish(&self.room, message)
            .await
            .map_err(NegotiationError::from)
    }
}
