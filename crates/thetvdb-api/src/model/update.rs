//! Update record.

use serde::Deserialize;

/// A series updated within the queried interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateData {
    /// Series ID.
    pub id: u64,
    /// Update time (Unix timestamp).
    pub last_updated: i64,
}
