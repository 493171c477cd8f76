//! Live sockets keyed by seat.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use axum::extract::ws::Message;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};
use uno_duel_execution::Delivery;
use uno_duel_types::{PlayerId, RoomId, ServerMessage};

/// Identifies one socket across rejoins of the same seat.
pub type ConnectionId = u64;

struct Connection {
    id: ConnectionId,
    tx: UnboundedSender<Message>,
}

#[derive(Default)]
pub struct Connections {
    next_id: AtomicU64,
    seats: Mutex<BTreeMap<(RoomId, PlayerId), Connection>>,
}

impl Connections {
    pub fn next_id(&self) -> ConnectionId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Routes the seat to `tx`, replacing any earlier socket.
    pub fn bind(
        &self,
        room: RoomId,
        player: PlayerId,
        id: ConnectionId,
        tx: UnboundedSender<Message>,
    ) {
        let Ok(mut seats) = self.seats.lock() else {
            warn!("connection registry poisoned");
            return;
        };
        seats.insert((room, player), Connection { id, tx });
    }

    /// Drops the seat's route only if it still belongs to connection `id`.
    pub fn unbind(&self, room: &RoomId, player: &PlayerId, id: ConnectionId) {
        let Ok(mut seats) = self.seats.lock() else {
            warn!("connection registry poisoned");
            return;
        };
        let key = (room.clone(), *player);
        if seats.get(&key).is_some_and(|conn| conn.id == id) {
            seats.remove(&key);
        }
    }

    /// Sends each delivery to its seat's live socket. Seats without one are skipped.
    pub fn deliver(&self, room: &RoomId, deliveries: Vec<Delivery>) {
        let Ok(seats) = self.seats.lock() else {
            warn!("connection registry poisoned");
            return;
        };
        for delivery in deliveries {
            let Some(conn) = seats.get(&(room.clone(), delivery.to)) else {
                debug!(%room, player = %delivery.to, "no live connection");
                continue;
            };
            send(&conn.tx, &delivery.message);
        }
    }

    pub fn len(&self) -> usize {
        self.seats.lock().map_or(0, |seats| seats.len())
    }
}

pub fn send(tx: &UnboundedSender<Message>, message: &ServerMessage) {
    match serde_json::to_string(message) {
        Ok(payload) => {
            let _ = tx.send(Message::Text(payload));
        }
        Err(err) => warn!(?err, "failed to encode outbound message"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn error(message: &str) -> ServerMessage {
        ServerMessage::Error {
            message: message.to_string(),
        }
    }

    #[test]
    fn test_rebind_keeps_newest_socket() {
        let connections = Connections::default();
        let room = RoomId::parse("lobby").unwrap();
        let player = PlayerId::from_random_bytes([1; 16]);
        let (old_tx, mut old_rx) = mpsc::unbounded_channel();
        let (new_tx, mut new_rx) = mpsc::unbounded_channel();

        let old_id = connections.next_id();
        let new_id = connections.next_id();
        connections.bind(room.clone(), player, old_id, old_tx);
        connections.bind(room.clone(), player, new_id, new_tx);

        // The stale socket closing must not unroute the fresh one.
        connections.unbind(&room, &player, old_id);
        assert_eq!(connections.len(), 1);

        connections.deliver(
            &room,
            vec![Delivery {
                to: player,
                message: error("hello"),
            }],
        );
        assert!(old_rx.try_recv().is_err());
        let Ok(Message::Text(text)) = new_rx.try_recv() else {
            panic!("expected a text frame");
        };
        assert_eq!(text, r#"{"type":"error","message":"hello"}"#);

        connections.unbind(&room, &player, new_id);
        assert_eq!(connections.len(), 0);
    }

    #[test]
    fn test_deliver_skips_offline_seats() {
        let connections = Connections::default();
        let room = RoomId::parse("lobby").unwrap();
        connections.deliver(
            &room,
            vec![Delivery {
                to: PlayerId::from_random_bytes([2; 16]),
                message: error("nobody home"),
            }],
        );
        assert_eq!(connections.len(), 0);
    }
}
