//! Analytics page records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::amount_serde;

/// Traffic summary for the selected period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsStats {
    pub page_views: u64,
    /// Average session length, already formatted ("4m 32s").
    pub avg_session: String,
    #[serde(with = "amount_serde")]
    pub bounce_rate: Decimal,
}

/// A page ranked by views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopPage {
    pub path: String,
    pub views: u64,
}

/// Share of sessions per device class, in percent.
///
/// The shares are reported independently and need not sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceTraffic {
    pub desktop: u8,
    pub mobile: u8,
    pub tablet: u8,
}

impl DeviceTraffic {
    /// Labelled shares in display order.
    #[must_use]
    pub const fn shares(&self) -> [(&'static str, u8); 3] {
        [
            ("Desktop", self.desktop),
            ("Mobile", self.mobile),
            ("Tablet", self.tablet),
        ]
    }
}

/// Everything the analytics page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub stats: AnalyticsStats,
    pub top_pages: Vec<TopPage>,
    pub device_traffic: DeviceTraffic,
}

impl AnalyticsSnapshot {
    /// Views of the most visited page, used to scale the bars.
    #[must_use]
    pub fn max_views(&self) -> u64 {
        self.top_pages.iter().map(|p| p.views).max().unwrap_or(0)
    }
}
