use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{millis_to_datetime, now_millis, Quote};

/// A favorited quote plus the moment it was favorited (epoch milliseconds)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteRecord {
    #[serde(flatten)]
    pub quote: Quote,
    #[serde(rename = "favoritedAt")]
    pub favorited_at: i64,
}

impl FavoriteRecord {
    /// Create a favorite stamped with the current time
    pub fn new(quote: Quote) -> Self {
        Self {
            quote,
            favorited_at: now_millis(),
        }
    }

    pub fn id(&self) -> &str {
        &self.quote.id
    }

    pub fn favorited_at_datetime(&self) -> DateTime<Utc> {
        millis_to_datetime(self.favorited_at)
    }
}
