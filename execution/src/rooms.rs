//! Registry of rooms keyed by room id.
//!
//! Each room sits behind its own lock so commands for one room serialize
//! without blocking any other room. Rooms are created on first join and kept
//! for the lifetime of the process.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::info;
use uno_duel_types::{HouseRules, RoomId};

use crate::error::RepositoryError;
use crate::rng::GameRng;
use crate::room::Room;

pub type SharedRoom = Arc<Mutex<Room>>;

pub struct RoomRepository {
    rules: HouseRules,
    rng: Mutex<GameRng>,
    rooms: Mutex<BTreeMap<RoomId, SharedRoom>>,
}

impl RoomRepository {
    /// Every room's stream is forked from `rng`, so a seeded repository
    /// replays identically for the same sequence of joins and actions.
    pub fn new(rules: HouseRules, rng: GameRng) -> Self {
        Self {
            rules,
            rng: Mutex::new(rng),
            rooms: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn rules(&self) -> &HouseRules {
        &self.rules
    }

    /// Returns the room for `room_id`, creating it if needed.
    pub fn open(&self, room_id: &RoomId) -> Result<SharedRoom, RepositoryError> {
        let mut rooms = self.rooms.lock().map_err(|_| RepositoryError::Poisoned)?;
        if let Some(room) = rooms.get(room_id) {
            return Ok(Arc::clone(room));
        }
        let rng = self
            .rng
            .lock()
            .map_err(|_| RepositoryError::Poisoned)?
            .fork();
        let room = Arc::new(Mutex::new(Room::new(room_id.clone(), self.rules, rng)));
        rooms.insert(room_id.clone(), Arc::clone(&room));
        info!(room = %room_id, "room created");
        Ok(room)
    }

    pub fn get(&self, room_id: &RoomId) -> Result<Option<SharedRoom>, RepositoryError> {
        let rooms = self.rooms.lock().map_err(|_| RepositoryError::Poisoned)?;
        Ok(rooms.get(room_id).cloned())
    }

    pub fn len(&self) -> Result<usize, RepositoryError> {
        let rooms = self.rooms.lock().map_err(|_| RepositoryError::Poisoned)?;
        Ok(rooms.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_reuses_rooms() {
        let repo = RoomRepository::new(HouseRules::default(), GameRng::seeded(3));
        let lobby = RoomId::parse("lobby").unwrap();
        let other = RoomId::parse("other").unwrap();

        let first = repo.open(&lobby).unwrap();
        let again = repo.open(&lobby).unwrap();
        assert!(Arc::ptr_eq(&first, &again));
        assert!(repo.get(&other).unwrap().is_none());

        repo.open(&other).unwrap();
        assert_eq!(repo.len().unwrap(), 2);
    }

    #[test]
    fn test_rooms_are_independent() {
        let repo = RoomRepository::new(HouseRules::default(), GameRng::seeded(3));
        let lobby = repo.open(&RoomId::parse("lobby").unwrap()).unwrap();
        let other = repo.open(&RoomId::parse("other").unwrap()).unwrap();

        lobby.lock().unwrap().join("Ada").unwrap();
        lobby.lock().unwrap().join("Bob").unwrap();
        assert!(lobby.lock().unwrap().state().started);
        assert!(other.lock().unwrap().state().seats.is_empty());
    }
}
