mod favorite;
mod quote;

pub use favorite::FavoriteRecord;
pub use quote::Quote;

use chrono::{DateTime, Utc};

/// Convert a Unix timestamp in milliseconds to DateTime<Utc>
pub fn millis_to_datetime(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

/// Current time as a Unix timestamp in milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
