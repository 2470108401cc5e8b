use std::str::FromStr;
use std::sync::Arc;

use axum::{routing::post, Extension, Json, Router};
use log::info;
use serde_json::{json, Value};

use roomlink_protocol::gateway::{JoinRoomRequest, SendSignalRequest};
use roomlink_protocol::{ConnectionId, RelayEvent, RoomId, SignalKind, SignalMessage};

use crate::error::GatewayError;
use crate::relay::RoomRelay;

const JOIN_ROOM_FIELDS: &str = "roomId, connectionId";
const SEND_SIGNAL_FIELDS: &str = "roomId, signal, type, connectionId";

/// Empty and absent both count as missing; checked before any relay call.
fn required<'a>(
    field: &'a Option<String>,
    fields: &'static str,
) -> Result<&'a str, GatewayError> {
    match field.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(GatewayError::Validation(fields)),
    }
}

async fn join_room(
    Extension(relay): Extension<Arc<dyn RoomRelay>>,
    Json(request): Json<JoinRoomRequest>,
) -> Result<Json<Value>, GatewayError> {
    let room = RoomId::new(required(&request.room_id, JOIN_ROOM_FIELDS)?.to_owned());
    let connection =
        ConnectionId::new(required(&request.connection_id, JOIN_ROOM_FIELDS)?.to_owned());

    relay.join_group(&room, &connection).await?;
    info!("connection {} joined room {}", connection, room);

    // The joiner receives their own join event as well; receivers drop it
    // by comparing the embedded id against their local identity.
    relay
        .broadcast_to_group(
            &room,
            RelayEvent::UserJoined {
                connection_id: connection,
            },
        )
        .await?;

    Ok(Json(json!({ "success": true })))
}

async fn send_signal(
    Extension(relay): Extension<Arc<dyn RoomRelay>>,
    Json(request): Json<SendSignalRequest>,
) -> Result<Json<Value>, GatewayError> {
    let room = RoomId::new(required(&request.room_id, SEND_SIGNAL_FIELDS)?.to_owned());
    let kind = SignalKind::from_str(required(&request.kind, SEND_SIGNAL_FIELDS)?)
        .map_err(|_| GatewayError::Validation(SEND_SIGNAL_FIELDS))?;
    let signal = match request.signal {
        Some(value) if !value.is_null() => value,
        _ => return Err(GatewayError::Validation(SEND_SIGNAL_FIELDS)),
    };
    let sender = ConnectionId::new(
        required(&request.sender_connection_id, SEND_SIGNAL_FIELDS)?.to_owned(),
    );

    info!("relaying {} signal from {} to room {}", kind, sender, room);
    relay
        .broadcast_to_group(
            &room,
            RelayEvent::Signal(SignalMessage {
                kind,
                signal,
                sender,
            }),
        )
        .await?;

    Ok(Json(json!({ "success": true })))
}

pub fn create_router(relay: Arc<dyn RoomRelay>) -> Router {
    Router::new()
        .route("/joinRoom", post(join_room))
        .route("/sendSignal", post(send_signal))
        .layer(Extension(relay))
}
