use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{clock::Clock, models::RoomDetail, repository::RoomRepository, types::NewRoom};

/// Service for the room registry: stamping, lookup and ordering
pub struct RoomService {
    repository: Arc<dyn RoomRepository + Send + Sync>,
    clock: Arc<dyn Clock>,
}

impl RoomService {
    pub fn new(repository: Arc<dyn RoomRepository + Send + Sync>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Stores the room under its id, stamped with the current time.
    /// A room already published under that id is replaced.
    #[instrument(skip(self, room), fields(room_id = %room.id))]
    pub async fn publish(&self, room: NewRoom) -> RoomDetail {
        let detail = RoomDetail {
            id: room.id,
            mcu_url: room.mcu_url,
            name: room.name,
            publisher_user_id: room.publisher_user_id,
            created_at_millis: self.clock.now_millis(),
        };

        self.repository.upsert_room(detail.clone()).await;

        info!(
            publisher_user_id = %detail.publisher_user_id,
            created_at_millis = detail.created_at_millis,
            "Room published"
        );

        detail
    }

    /// Removes the room if present. Unknown ids are not an error.
    #[instrument(skip(self))]
    pub async fn unpublish(&self, room_id: &str) {
        if self.repository.remove_room(room_id).await {
            info!("Room unpublished");
        } else {
            debug!("Unpublish requested for unknown room");
        }
    }

    #[instrument(skip(self))]
    pub async fn query_one(&self, room_id: &str) -> Option<RoomDetail> {
        self.repository.get_room(room_id).await
    }

    /// Every room, most recently published first
    #[instrument(skip(self))]
    pub async fn query_all(&self) -> Vec<RoomDetail> {
        let mut rooms = self.repository.list_rooms().await;
        rooms.sort_by(|a, b| {
            b.created_at_millis
                .cmp(&a.created_at_millis)
                .then_with(|| a.id.cmp(&b.id))
        });

        debug!(room_count = rooms.len(), "Rooms sorted by recency");
        rooms
    }

    /// Without an id this lists every room; with one it returns zero or one rooms
    pub async fn query(&self, room_id: Option<&str>) -> Vec<RoomDetail> {
        match room_id {
            None => self.query_all().await,
            Some(room_id) => self.query_one(room_id).await.into_iter().collect(),
        }
    }
}
