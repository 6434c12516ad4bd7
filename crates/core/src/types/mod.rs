//! Core types for the Nexus dashboard.
//!
//! Records mirror what the dashboard's data source returns. Field order on the
//! serializable records is significant: it is the column order of CSV exports.

pub mod analytics;
pub mod customer;
pub mod email;
pub mod id;
pub mod money;
pub mod overview;
pub mod profile;
pub mod sales;
pub mod status;

pub use analytics::{AnalyticsSnapshot, AnalyticsStats, DeviceTraffic, TopPage};
pub use customer::Customer;
pub use email::{Email, EmailError};
pub use id::*;
pub use money::{format_currency, format_grouped, format_grouped_int};
pub use overview::{Notification, OverviewStats};
pub use profile::{NotificationChannel, NotificationPreferences, ProfileUpdate, UserProfile};
pub use sales::{Financials, SalesSnapshot, Transaction};
pub use status::*;
