use serde::{Deserialize, Serialize};

use super::models::RoomDetail;
use crate::shared::{AppError, ResultCode};

/// Request payload for publishing a room
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PublishRequest {
    #[serde(rename = "roomId")]
    pub room_id: Option<String>,
    #[serde(rename = "mcuUrl")]
    pub mcu_url: Option<String>,
    #[serde(rename = "roomName")]
    pub room_name: Option<String>,
    #[serde(rename = "pubUserId")]
    pub pub_user_id: Option<String>,
}

/// Publish fields after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    pub id: String,
    pub mcu_url: String,
    pub name: String,
    pub publisher_user_id: String,
}

impl PublishRequest {
    /// Checks every required field and reports all of the missing ones at once
    pub fn validate(self) -> Result<NewRoom, AppError> {
        let mut missing = Vec::new();
        let room_id = required(self.room_id, "roomId", &mut missing);
        let mcu_url = required(self.mcu_url, "mcuUrl", &mut missing);
        let room_name = required(self.room_name, "roomName", &mut missing);
        let pub_user_id = required(self.pub_user_id, "pubUserId", &mut missing);

        match (room_id, mcu_url, room_name, pub_user_id) {
            (Some(id), Some(mcu_url), Some(name), Some(publisher_user_id)) => Ok(NewRoom {
                id,
                mcu_url,
                name,
                publisher_user_id,
            }),
            _ => Err(AppError::missing_fields(&missing)),
        }
    }
}

/// Request payload naming a room; used by unpublish and query
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RoomIdRequest {
    #[serde(rename = "roomId")]
    pub room_id: Option<String>,
}

impl RoomIdRequest {
    /// Unpublish needs a concrete room id
    pub fn require_room_id(self) -> Result<String, AppError> {
        let mut missing = Vec::new();
        required(self.room_id, "roomId", &mut missing)
            .ok_or_else(|| AppError::missing_fields(&missing))
    }

    /// Query treats an absent or empty id as "every room"
    pub fn filter(self) -> Option<String> {
        self.room_id.filter(|id| !id.is_empty())
    }
}

/// Response for room queries
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomListResponse {
    pub code: ResultCode,
    #[serde(rename = "roomList")]
    pub room_list: Vec<RoomDetail>,
}

impl RoomListResponse {
    pub fn ok(room_list: Vec<RoomDetail>) -> Self {
        Self {
            code: ResultCode::Ok,
            room_list,
        }
    }
}

fn required(
    value: Option<String>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    match value {
        Some(value) if !value.is_empty() => Some(value),
        _ => {
            missing.push(field);
            None
        }
    }
}
