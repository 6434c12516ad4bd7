//! Overview page records: headline gauges and the activity feed.

use serde::{Deserialize, Serialize};

use super::id::NotificationId;
use super::status::NotificationKind;

/// Headline gauges shown on the overview page.
///
/// Field order is the column order of the overview report export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub revenue: u64,
    pub users: u64,
    pub bounce_rate: u32,
    pub server_load: u32,
}

/// A single entry in the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub text: String,
    /// Relative time, already formatted for display ("15 min ago").
    pub time: String,
    /// Presentation tag for the bubble background.
    pub color: String,
}
