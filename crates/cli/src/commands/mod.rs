//! CLI command implementations.

pub mod export;
pub mod summary;

use nexus_admin::api::{ApiError, MockApi};
use nexus_admin::config::ApiConfig;

/// Open the seeded data store with no simulated latency.
///
/// With `offline` set every accessor fails, as the dashboard does under
/// `NEXUS_API_OFFLINE`.
pub fn connect(offline: bool) -> Result<MockApi, ApiError> {
    MockApi::new(ApiConfig {
        offline,
        ..ApiConfig::default()
    })
}
