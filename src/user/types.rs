use serde::{Deserialize, Serialize};

use crate::shared::AppError;

/// Request payload for issuing an IM token
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TokenRequest {
    pub id: Option<String>,
}

impl TokenRequest {
    pub fn require_user_id(self) -> Result<String, AppError> {
        match self.id {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(AppError::missing_fields(&["id"])),
        }
    }
}

/// Credential minted by the messaging provider, echoed to the caller as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub token: String,
}
