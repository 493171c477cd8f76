//! One WebSocket connection: decode frames, dispatch to rooms, fan out snapshots.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State as AxumState;
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uno_duel_execution::{JoinError, RoomRepository};
use uno_duel_types::{
    normalize_name, Action, ClientMessage, Inbound, PlayerId, RoomId, ServerMessage,
};

use crate::connections::{send, ConnectionId, Connections};

#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<RoomRepository>,
    pub connections: Arc<Connections>,
}

/// The seat a socket has joined, if any.
struct Session {
    id: ConnectionId,
    seat: Option<(RoomId, PlayerId)>,
}

pub fn decode_frame(text: &str) -> Result<Inbound, serde_json::Error> {
    serde_json::from_str::<ClientMessage>(text).map(Inbound::from)
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    AxumState(state): AxumState<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    let mut session = Session {
        id: state.connections.next_id(),
        seat: None,
    };
    info!(connection = session.id, "connection opened");

    let write_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(message)) = receiver.next().await {
        match message {
            Message::Text(text) => match decode_frame(&text) {
                Ok(inbound) => handle_inbound(inbound, &state, &mut session, &tx),
                Err(err) => {
                    warn!(?err, "invalid inbound message");
                }
            },
            Message::Close(_) => break,
            _ => {}
        }
    }

    if let Some((room, player)) = &session.seat {
        state.connections.unbind(room, player, session.id);
    }
    info!(
        connection = session.id,
        live_seats = state.connections.len(),
        "connection closed"
    );
    write_task.abort();
}

fn handle_inbound(
    inbound: Inbound,
    state: &AppState,
    session: &mut Session,
    tx: &mpsc::UnboundedSender<Message>,
) {
    match inbound {
        Inbound::Join { room_id, name } => {
            let room_id = room_id.as_deref().and_then(RoomId::parse);
            let name = name.as_deref().and_then(normalize_name);
            match (room_id, name) {
                (Some(room_id), Some(name)) => handle_join(room_id, &name, state, session, tx),
                _ => send_error(tx, JoinError::MissingField.to_string()),
            }
        }
        Inbound::Action(action) => handle_action(action, state, session, tx),
    }
}

fn handle_join(
    room_id: RoomId,
    name: &str,
    state: &AppState,
    session: &mut Session,
    tx: &mpsc::UnboundedSender<Message>,
) {
    let room = match state.rooms.open(&room_id) {
        Ok(room) => room,
        Err(err) => {
            warn!(?err, room = %room_id, "failed to open room");
            return;
        }
    };
    let Ok(mut room) = room.lock() else {
        warn!(room = %room_id, "room lock poisoned");
        return;
    };
    match room.join(name) {
        Ok(joined) => {
            if let Some((previous_room, previous_player)) = session.seat.take() {
                state
                    .connections
                    .unbind(&previous_room, &previous_player, session.id);
            }
            state
                .connections
                .bind(room_id.clone(), joined.player, session.id, tx.clone());
            session.seat = Some((room_id.clone(), joined.player));
            // Still under the room lock so snapshots leave in command order.
            state.connections.deliver(&room_id, joined.deliveries);
        }
        Err(err) => {
            debug!(room = %room_id, %err, "join rejected");
            send_error(tx, err.to_string());
        }
    }
}

fn handle_action(
    action: Action,
    state: &AppState,
    session: &Session,
    tx: &mpsc::UnboundedSender<Message>,
) {
    let Some((room_id, player)) = &session.seat else {
        debug!(connection = session.id, ?action, "action before join ignored");
        return;
    };
    let room = match state.rooms.get(room_id) {
        Ok(Some(room)) => room,
        Ok(None) => return,
        Err(err) => {
            warn!(?err, room = %room_id, "failed to look up room");
            return;
        }
    };
    let Ok(mut room) = room.lock() else {
        warn!(room = %room_id, "room lock poisoned");
        return;
    };
    match room.handle(*player, action) {
        Ok(deliveries) => state.connections.deliver(room_id, deliveries),
        Err(err) if err.is_reported() => send_error(tx, err.to_string()),
        Err(_) => {}
    }
}

fn send_error(tx: &mpsc::UnboundedSender<Message>, message: String) {
    send(tx, &ServerMessage::Error { message });
}
