use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A single user rating of a movie (`u.data` row)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    pub user_id: u32,
    pub movie_id: u32,
    pub score: f64,
    /// Unix seconds
    pub timestamp: i64,
}

impl Rating {
    pub fn rated_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.timestamp, 0).single()
    }
}
