use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};

use roomcast::{user::types::IssuedToken, AppError, Clock, TokenIssuer};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Clock that advances by one millisecond on every reading
pub struct SteppingClock {
    next: AtomicI64,
}

impl SteppingClock {
    pub fn starting_at(millis: i64) -> Self {
        Self {
            next: AtomicI64::new(millis),
        }
    }
}

impl Clock for SteppingClock {
    fn now_millis(&self) -> i64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}

/// Token issuer that never leaves the process
pub struct StubTokenIssuer;

#[async_trait]
impl TokenIssuer for StubTokenIssuer {
    async fn issue_token(&self, user_id: &str) -> Result<IssuedToken, AppError> {
        Ok(IssuedToken {
            user_id: user_id.to_string(),
            token: format!("stub-{user_id}"),
        })
    }
}
