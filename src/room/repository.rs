use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, instrument};

use super::models::RoomDetail;

/// Storage for published rooms
///
/// Every record is stored and removed as a whole value, so a reader never
/// sees a partially written room.
#[async_trait]
pub trait RoomRepository {
    /// Inserts the room, replacing any room with the same id
    async fn upsert_room(&self, room: RoomDetail);
    /// Removes the room; returns whether it existed
    async fn remove_room(&self, room_id: &str) -> bool;
    async fn get_room(&self, room_id: &str) -> Option<RoomDetail>;
    /// Every stored room, in no particular order
    async fn list_rooms(&self) -> Vec<RoomDetail>;
}

/// In-memory implementation of RoomRepository
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<String, RoomDetail>>,
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }

    // A poisoned lock still guards whole records only, so the map stays usable
    fn rooms(&self) -> MutexGuard<'_, HashMap<String, RoomDetail>> {
        self.rooms.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    #[instrument(skip(self, room), fields(room_id = %room.id))]
    async fn upsert_room(&self, room: RoomDetail) {
        let replaced = self.rooms().insert(room.id.clone(), room).is_some();
        debug!(replaced, "Room stored in memory");
    }

    #[instrument(skip(self))]
    async fn remove_room(&self, room_id: &str) -> bool {
        let removed = self.rooms().remove(room_id).is_some();
        debug!(removed, "Room removal processed in memory");
        removed
    }

    #[instrument(skip(self))]
    async fn get_room(&self, room_id: &str) -> Option<RoomDetail> {
        let room = self.rooms().get(room_id).cloned();

        match &room {
            Some(r) => debug!(room_name = %r.name, "Room found in memory"),
            None => debug!("Room not found in memory"),
        }

        room
    }

    #[instrument(skip(self))]
    async fn list_rooms(&self) -> Vec<RoomDetail> {
        let room_list: Vec<RoomDetail> = self.rooms().values().cloned().collect();
        debug!(room_count = room_list.len(), "Rooms listed from memory");
        room_list
    }
}
