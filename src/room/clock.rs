use chrono::Utc;

/// Source of publish timestamps
pub trait Clock: Send + Sync {
    /// Current time as epoch milliseconds
    fn now_millis(&self) -> i64;
}

/// Wall clock backed by the system time
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
