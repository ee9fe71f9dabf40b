use chrono::{DateTime, Utc};

/// Source of "now" for cache timestamps and expiry thresholds.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
