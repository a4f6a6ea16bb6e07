//! On-disk record types for client storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stored value with the time it was last written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredItem {
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

impl StoredItem {
    /// Wraps a value stamped with the current time.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            updated_at: Utc::now(),
        }
    }
}
