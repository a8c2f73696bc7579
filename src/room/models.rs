use serde::{Deserialize, Serialize};

/// A published room as held by the registry and returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetail {
    #[serde(rename = "roomId")]
    pub id: String,
    #[serde(rename = "mcuUrl")]
    pub mcu_url: String,
    #[serde(rename = "roomName")]
    pub name: String,
    #[serde(rename = "pubUserId")]
    pub publisher_user_id: String,
    /// Epoch milliseconds stamped when the room was (re)published
    #[serde(rename = "date")]
    pub created_at_millis: i64,
}
